//! WebSocket request multiplexer.
//!
//! This module provides a client that carries many request/response pairs
//! over one connection. Each outgoing request is tagged with a numeric
//! `req_id`; the reply echoing that id is delivered to the caller that sent
//! it. Server-pushed messages (e.g. streamed ticks) reach the optional
//! global handler.
//!
//! # Example
//!
//! ```rust,ignore
//! use derivws_sdk::ws::{ApiRequest, DerivWs, WsConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DerivWs::connect(WsConfig::new("1089")).await?;
//!
//!     client
//!         .set_global_handler(|msg| println!("Global message: {}", msg))
//!         .await;
//!
//!     let pong = client.request(&ApiRequest::ping()).await?;
//!     println!("Received: {}", pong);
//!
//!     client.send(&ApiRequest::ticks("R_100", true), None).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod messages;
pub mod metrics;
pub mod pending;
pub mod router;

pub use client::DerivWs;
pub use config::{WsConfig, DEFAULT_WS_URL, REQ_ID_FIELD};
pub use error::WsError;
pub use messages::{ApiError, ApiRequest, MessageBody, Response};
pub use metrics::MuxMetrics;
pub use pending::{PendingTable, ResponseHandler};
pub use router::{GlobalHandler, Router};
