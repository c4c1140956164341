//! Contract types.
//!
//! Provides price proposal requests and replies, and purchase receipts.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Contract direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractType {
    /// Rise: exit spot above entry spot.
    #[serde(rename = "CALL")]
    Rise,
    /// Fall: exit spot below entry spot.
    #[serde(rename = "PUT")]
    Fall,
    /// Last digit matches the prediction.
    #[serde(rename = "DIGITMATCH")]
    DigitMatch,
    /// Last digit differs from the prediction.
    #[serde(rename = "DIGITDIFF")]
    DigitDiff,
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rise => write!(f, "CALL"),
            Self::Fall => write!(f, "PUT"),
            Self::DigitMatch => write!(f, "DIGITMATCH"),
            Self::DigitDiff => write!(f, "DIGITDIFF"),
        }
    }
}

/// Contract duration unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationUnit {
    /// Ticks.
    #[serde(rename = "t")]
    Ticks,
    /// Seconds.
    #[serde(rename = "s")]
    Seconds,
    /// Minutes.
    #[serde(rename = "m")]
    Minutes,
    /// Hours.
    #[serde(rename = "h")]
    Hours,
    /// Days.
    #[serde(rename = "d")]
    Days,
}

/// Whether `amount` is the stake or the payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Basis {
    /// Amount is the stake.
    Stake,
    /// Amount is the payout.
    Payout,
}

/// Parameters of a `proposal` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProposalRequest {
    proposal: u8,

    /// Stake or payout amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    /// Meaning of `amount`.
    pub basis: Basis,

    /// Contract direction.
    pub contract_type: ContractType,

    /// Account currency.
    pub currency: String,

    /// Contract duration.
    pub duration: u32,

    /// Unit of `duration`.
    pub duration_unit: DurationUnit,

    /// Underlying symbol.
    pub symbol: String,

    /// Digit prediction for digit contracts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barrier: Option<String>,

    /// Whether to stream price updates for this proposal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribe: Option<u8>,
}

impl ProposalRequest {
    /// Creates a stake-based proposal lasting five ticks.
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        contract_type: ContractType,
        amount: Decimal,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            proposal: 1,
            amount,
            basis: Basis::Stake,
            contract_type,
            currency: currency.into(),
            duration: 5,
            duration_unit: DurationUnit::Ticks,
            symbol: symbol.into(),
            barrier: None,
            subscribe: None,
        }
    }

    /// Sets the duration.
    #[must_use]
    pub fn with_duration(mut self, duration: u32, unit: DurationUnit) -> Self {
        self.duration = duration;
        self.duration_unit = unit;
        self
    }

    /// Sets the basis.
    #[must_use]
    pub fn with_basis(mut self, basis: Basis) -> Self {
        self.basis = basis;
        self
    }

    /// Sets the barrier (digit prediction).
    #[must_use]
    pub fn with_barrier(mut self, barrier: impl Into<String>) -> Self {
        self.barrier = Some(barrier.into());
        self
    }

    /// Streams proposal updates until forgotten.
    #[must_use]
    pub fn subscribed(mut self) -> Self {
        self.subscribe = Some(1);
        self
    }
}

/// A priced contract offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    /// Proposal id, passed to `buy`.
    pub id: String,

    /// Price to pay.
    pub ask_price: Decimal,

    /// Payout on win.
    pub payout: Decimal,

    /// Current spot price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot: Option<Decimal>,

    /// Human-readable contract description.
    #[serde(default)]
    pub longcode: String,

    /// Start epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_start: Option<i64>,
}

impl Proposal {
    /// Returns the payout to price ratio.
    ///
    /// Returns `None` for a zero price or when the ratio overflows.
    #[must_use]
    pub fn payout_ratio(&self) -> Option<Decimal> {
        self.payout.checked_div(self.ask_price)
    }
}

/// Receipt of a successful `buy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyReceipt {
    /// Contract id.
    pub contract_id: u64,

    /// Transaction id.
    pub transaction_id: u64,

    /// Price paid.
    pub buy_price: Decimal,

    /// Potential payout.
    pub payout: Decimal,

    /// Account balance after the purchase.
    pub balance_after: Decimal,

    /// Human-readable contract description.
    #[serde(default)]
    pub longcode: String,

    /// Purchase epoch.
    #[serde(default)]
    pub start_time: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_contract_type_serde() {
        assert_eq!(
            serde_json::to_value(ContractType::Rise).expect("serialize"),
            json!("CALL")
        );
        let parsed: ContractType = serde_json::from_str("\"PUT\"").expect("deserialize");
        assert_eq!(parsed, ContractType::Fall);
        assert_eq!(ContractType::DigitDiff.to_string(), "DIGITDIFF");
    }

    #[test]
    fn test_proposal_request_serialize() {
        let request = ProposalRequest::new("R_100", ContractType::Rise, Decimal::from(10), "USD")
            .with_duration(1, DurationUnit::Minutes);

        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            value,
            json!({
                "proposal": 1,
                "amount": 10.0,
                "basis": "stake",
                "contract_type": "CALL",
                "currency": "USD",
                "duration": 1,
                "duration_unit": "m",
                "symbol": "R_100"
            })
        );
    }

    #[test]
    fn test_proposal_request_digit_subscribed() {
        let request =
            ProposalRequest::new("R_10", ContractType::DigitMatch, Decimal::new(25, 1), "USD")
                .with_basis(Basis::Payout)
                .with_barrier("7")
                .subscribed();

        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(value["barrier"], json!("7"));
        assert_eq!(value["subscribe"], json!(1));
        assert_eq!(value["basis"], json!("payout"));
        assert_eq!(value["amount"], json!(2.5));
    }

    #[test]
    fn test_proposal_deserialize() {
        let json = r#"{
            "id": "abc-123",
            "ask_price": 10,
            "payout": 19.55,
            "spot": 1234.56,
            "longcode": "Win payout if Volatility 100 Index is strictly higher...",
            "date_start": 1700000000
        }"#;

        let proposal: Proposal = serde_json::from_str(json).expect("deserialize");
        assert_eq!(proposal.id, "abc-123");
        assert_eq!(proposal.payout_ratio(), Some(Decimal::new(1955, 3)));
    }

    #[test]
    fn test_payout_ratio_zero_and_overflow() {
        let mut proposal: Proposal = serde_json::from_value(json!({
            "id": "abc-123",
            "ask_price": 0,
            "payout": 19.55
        }))
        .expect("deserialize");
        assert_eq!(proposal.payout_ratio(), None);

        proposal.ask_price = Decimal::new(1, 28);
        proposal.payout = Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0);
        assert_eq!(proposal.payout_ratio(), None);
    }

    #[test]
    fn test_buy_receipt_deserialize() {
        let json = r#"{
            "balance_after": 9990,
            "buy_price": 10,
            "contract_id": 250000000001,
            "longcode": "Win payout if ...",
            "payout": 19.55,
            "purchase_time": 1700000001,
            "start_time": 1700000001,
            "transaction_id": 500000000001
        }"#;

        let receipt: BuyReceipt = serde_json::from_str(json).expect("deserialize");
        assert_eq!(receipt.contract_id, 250_000_000_001);
        assert_eq!(receipt.balance_after, Decimal::from(9990));
    }
}
