//! Derivws App - opens a Deriv WebSocket session from environment configuration.
//!
//! The session logs every incoming message through a global handler,
//! registers the configured account token, authorizes with it and optionally
//! streams ticks for one symbol until shutdown.
//!
//! # Components
//!
//! - [`config`]: Environment configuration
//! - [`service`]: Session startup and shutdown

pub mod config;
pub mod service;

pub use config::{AppConfig, ConfigError};
pub use service::{AppError, AppService};
