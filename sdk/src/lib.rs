//! Derivws SDK - Rust client library for the Deriv WebSocket API.
//!
//! This crate multiplexes JSON requests and their responses over a single
//! WebSocket connection and provides typed views of the most common
//! messages.
//!
//! # Modules
//!
//! - [`ws`] - Connection multiplexer, request builders, incoming messages
//! - [`types`] - Typed payloads (ticks, symbols, proposals, balances)
//! - [`auth`] - In-memory account token registry
//!
//! # Example
//!
//! ```rust
//! use derivws_sdk::{ApiRequest, AuthToken, TokenStore};
//!
//! let mut store = TokenStore::new();
//! store
//!     .store([AuthToken::new("demo", "10000", "USD")])
//!     .unwrap();
//!
//! let ping = ApiRequest::ping();
//! let ticks = ApiRequest::ticks("R_100", true);
//! ```

pub mod auth;
pub mod error;
pub mod types;
pub mod ws;

pub use auth::{AuthToken, TokenStore};
pub use error::SdkError;
pub use types::{
    ActiveSymbol, Authorize, Balance, Basis, BuyReceipt, ContractType, DurationUnit, Proposal,
    ProposalRequest, Tick, TickHistory,
};
pub use ws::{ApiError, ApiRequest, DerivWs, MessageBody, Response, WsConfig, WsError};
