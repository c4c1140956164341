//! WebSocket message types.
//!
//! Outgoing requests are plain JSON objects; [`ApiRequest`] builds the common
//! ones. Incoming frames are wrapped in [`Response`], which keeps the raw
//! payload and decodes it on demand into a [`MessageBody`].

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::config::REQ_ID_FIELD;
use crate::error::SdkError;
use crate::types::{
    ActiveSymbol, Authorize, Balance, BuyReceipt, Proposal, ProposalRequest, Tick, TickHistory,
};

/// Client-to-server requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiRequest {
    /// Connection check.
    Ping {
        /// Always 1.
        ping: u8,
    },
    /// Authorize the connection with an API token.
    Authorize {
        /// API token.
        authorize: String,
    },
    /// Account balance.
    Balance {
        /// Always 1.
        balance: u8,
        /// Stream balance changes when set to 1.
        #[serde(skip_serializing_if = "Option::is_none")]
        subscribe: Option<u8>,
    },
    /// List of tradable symbols.
    ActiveSymbols {
        /// "brief" or "full".
        active_symbols: String,
    },
    /// Latest tick, optionally streamed.
    Ticks {
        /// Symbol code.
        ticks: String,
        /// Stream ticks when set to 1.
        #[serde(skip_serializing_if = "Option::is_none")]
        subscribe: Option<u8>,
    },
    /// Recent tick history.
    TicksHistory {
        /// Symbol code.
        ticks_history: String,
        /// End epoch or "latest".
        end: String,
        /// Number of ticks.
        count: u32,
        /// Always "ticks".
        style: String,
    },
    /// Price a contract.
    Proposal(ProposalRequest),
    /// Buy a proposal.
    Buy {
        /// Proposal id.
        buy: String,
        /// Maximum price to pay.
        #[serde(with = "rust_decimal::serde::float")]
        price: Decimal,
    },
    /// Stop one stream.
    Forget {
        /// Stream id.
        forget: String,
    },
    /// Stop every stream of the given types.
    ForgetAll {
        /// Stream types, e.g. "ticks".
        forget_all: Vec<String>,
    },
}

impl ApiRequest {
    /// Builds a `ping` request.
    #[must_use]
    pub const fn ping() -> Self {
        Self::Ping { ping: 1 }
    }

    /// Builds an `authorize` request.
    #[must_use]
    pub fn authorize(token: impl Into<String>) -> Self {
        Self::Authorize {
            authorize: token.into(),
        }
    }

    /// Builds a `balance` request.
    #[must_use]
    pub const fn balance(subscribe: bool) -> Self {
        Self::Balance {
            balance: 1,
            subscribe: if subscribe { Some(1) } else { None },
        }
    }

    /// Builds a brief `active_symbols` request.
    #[must_use]
    pub fn active_symbols() -> Self {
        Self::ActiveSymbols {
            active_symbols: "brief".to_string(),
        }
    }

    /// Builds a `ticks` request.
    #[must_use]
    pub fn ticks(symbol: impl Into<String>, subscribe: bool) -> Self {
        Self::Ticks {
            ticks: symbol.into(),
            subscribe: if subscribe { Some(1) } else { None },
        }
    }

    /// Builds a `ticks_history` request for the latest `count` ticks.
    #[must_use]
    pub fn ticks_history(symbol: impl Into<String>, count: u32) -> Self {
        Self::TicksHistory {
            ticks_history: symbol.into(),
            end: "latest".to_string(),
            count,
            style: "ticks".to_string(),
        }
    }

    /// Builds a `proposal` request.
    #[must_use]
    pub fn proposal(request: ProposalRequest) -> Self {
        Self::Proposal(request)
    }

    /// Builds a `buy` request.
    #[must_use]
    pub fn buy(proposal_id: impl Into<String>, price: Decimal) -> Self {
        Self::Buy {
            buy: proposal_id.into(),
            price,
        }
    }

    /// Builds a `forget` request.
    #[must_use]
    pub fn forget(stream_id: impl Into<String>) -> Self {
        Self::Forget {
            forget: stream_id.into(),
        }
    }

    /// Builds a `forget_all` request.
    #[must_use]
    pub fn forget_all<I, S>(stream_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ForgetAll {
            forget_all: stream_types.into_iter().map(Into::into).collect(),
        }
    }
}

/// Application-level error carried in the `error` field of a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code (e.g., "InvalidToken").
    pub code: String,

    /// Human-readable message.
    pub message: String,

    /// Extra details, when the server provides them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Decoded payload of an incoming message, keyed on `msg_type`.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    /// The message carries an `error` field.
    Error(ApiError),
    /// `authorize` reply.
    Authorize(Authorize),
    /// `balance` reply or update.
    Balance(Balance),
    /// `active_symbols` reply.
    ActiveSymbols(Vec<ActiveSymbol>),
    /// `tick` reply or update.
    Tick(Tick),
    /// `history` reply to `ticks_history`.
    History(TickHistory),
    /// `proposal` reply or update.
    Proposal(Proposal),
    /// `buy` reply.
    Buy(BuyReceipt),
    /// `forget` reply; true if a stream was stopped.
    Forget(bool),
    /// `forget_all` reply with the stopped stream ids.
    ForgetAll(Vec<String>),
    /// `ping` reply.
    Ping(String),
    /// Any other message type.
    Unknown {
        /// The `msg_type` field, if present.
        msg_type: Option<String>,
    },
}

/// An incoming message.
///
/// Always wraps a JSON object; the raw payload is kept so handlers can read
/// fields the typed layer does not model.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    raw: Value,
}

impl Response {
    /// Parses a text frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object.
    pub fn from_text(text: &str) -> Result<Self, SdkError> {
        let raw: Value = serde_json::from_str(text)?;
        Self::from_value(raw)
    }

    /// Wraps an already-parsed value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a JSON object.
    pub fn from_value(raw: Value) -> Result<Self, SdkError> {
        if raw.is_object() {
            Ok(Self { raw })
        } else {
            Err(SdkError::Deserialization(format!(
                "expected JSON object, got {}",
                json_kind(&raw)
            )))
        }
    }

    /// Returns the echoed request id, if any.
    #[must_use]
    pub fn req_id(&self) -> Option<u64> {
        self.raw.get(REQ_ID_FIELD).and_then(Value::as_u64)
    }

    /// Returns the message type.
    #[must_use]
    pub fn msg_type(&self) -> Option<&str> {
        self.raw.get("msg_type").and_then(Value::as_str)
    }

    /// Returns true if the message carries an `error` field.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.raw.get("error").is_some_and(|e| !e.is_null())
    }

    /// Returns the application error, if any.
    ///
    /// An `error` field that does not match the expected shape is reported
    /// with code `"Unknown"` and the raw field as message.
    #[must_use]
    pub fn error(&self) -> Option<ApiError> {
        let field = self.raw.get("error").filter(|e| !e.is_null())?;
        Some(
            serde_json::from_value(field.clone()).unwrap_or_else(|_| ApiError {
                code: "Unknown".to_string(),
                message: field.to_string(),
                details: None,
            }),
        )
    }

    /// Returns the stream id for subscription messages.
    #[must_use]
    pub fn subscription_id(&self) -> Option<&str> {
        self.raw
            .get("subscription")
            .and_then(|s| s.get("id"))
            .and_then(Value::as_str)
    }

    /// Returns the request echoed by the server.
    #[must_use]
    pub fn echo_req(&self) -> Option<&Value> {
        self.raw.get("echo_req")
    }

    /// Returns a field of the payload.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.raw.get(field)
    }

    /// Returns the raw payload.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.raw
    }

    /// Consumes the response and returns the raw payload.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.raw
    }

    /// Decodes the payload according to its `msg_type`.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload field named by `msg_type` is missing or
    /// does not match the expected shape.
    pub fn body(&self) -> Result<MessageBody, SdkError> {
        if let Some(error) = self.error() {
            return Ok(MessageBody::Error(error));
        }

        let Some(msg_type) = self.msg_type() else {
            return Ok(MessageBody::Unknown { msg_type: None });
        };

        let body = match msg_type {
            "authorize" => MessageBody::Authorize(self.decode(msg_type)?),
            "balance" => MessageBody::Balance(self.decode(msg_type)?),
            "active_symbols" => MessageBody::ActiveSymbols(self.decode(msg_type)?),
            "tick" => MessageBody::Tick(self.decode(msg_type)?),
            "history" => MessageBody::History(self.decode(msg_type)?),
            "proposal" => MessageBody::Proposal(self.decode(msg_type)?),
            "buy" => MessageBody::Buy(self.decode(msg_type)?),
            "forget" => MessageBody::Forget(self.decode::<u8>(msg_type)? != 0),
            "forget_all" => MessageBody::ForgetAll(self.decode(msg_type)?),
            "ping" => MessageBody::Ping(self.decode(msg_type)?),
            other => MessageBody::Unknown {
                msg_type: Some(other.to_string()),
            },
        };

        Ok(body)
    }

    fn decode<T: serde::de::DeserializeOwned>(&self, field: &str) -> Result<T, SdkError> {
        let value = self
            .raw
            .get(field)
            .ok_or_else(|| SdkError::MissingField(field.to_string()))?;
        T::deserialize(value).map_err(SdkError::from)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
