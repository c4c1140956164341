//! Core types for the Deriv SDK.
//!
//! This module provides the typed payloads carried inside API messages.

pub mod account;
pub mod contract;
pub mod market;
pub mod tick;

pub use account::{Authorize, Balance};
pub use contract::{Basis, BuyReceipt, ContractType, DurationUnit, Proposal, ProposalRequest};
pub use market::{group_by_market, ActiveSymbol};
pub use tick::{Tick, TickHistory};
