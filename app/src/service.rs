//! Session service.
//!
//! Opens a connection, logs every incoming message, registers the account
//! token, authorizes and starts the configured tick stream.

use std::future::Future;

use derivws_sdk::ws::ApiError;
use derivws_sdk::{ApiRequest, DerivWs, MessageBody, Response, SdkError, TokenStore, WsError};
use tracing::{debug, info, warn};

use super::config::{AppConfig, ConfigError};

/// Session errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Transport failure.
    #[error("websocket error: {0}")]
    Ws(#[from] WsError),

    /// Token registry or decoding failure.
    #[error("sdk error: {0}")]
    Sdk(#[from] SdkError),

    /// The server rejected a request.
    #[error("api error: {0}")]
    Api(ApiError),
}

/// The application session.
#[derive(Debug)]
pub struct AppService {
    config: AppConfig,
    tokens: TokenStore,
}

impl AppService {
    /// Creates a service.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self {
            config,
            tokens: TokenStore::new(),
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the token registry.
    #[must_use]
    pub const fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Opens the session and returns the live connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails or authorization is rejected.
    pub async fn start(&mut self) -> Result<DerivWs, AppError> {
        let client = DerivWs::connect(self.config.ws_config()).await?;
        client.set_global_handler(log_message).await;

        if let Some(token) = self.config.auth_token() {
            self.tokens.store([token])?;
        }

        if let Some(token) = self.tokens.default_token() {
            let response = client.request(&token.authorize_request()).await?;
            match response.body()? {
                MessageBody::Authorize(account) => info!(
                    "Authorized {} ({} {})",
                    account.loginid, account.balance, account.currency
                ),
                MessageBody::Error(error) => return Err(AppError::Api(error)),
                other => debug!("Unexpected authorize reply: {:?}", other),
            }
        }

        if let Some(symbol) = &self.config.symbol {
            let id = client.send(&ApiRequest::ticks(symbol.clone(), true), None).await?;
            info!("Streaming ticks for {} (req_id {})", symbol, id);
        }

        Ok(client)
    }

    /// Runs the session until `shutdown` completes, then closes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be started or closed.
    pub async fn run<F>(&mut self, shutdown: F) -> Result<(), AppError>
    where
        F: Future<Output = ()>,
    {
        let client = self.start().await?;
        info!("Session started");

        shutdown.await;

        info!("Shutting down session");
        client.close().await?;
        Ok(())
    }
}

/// Global handler: logs every incoming message.
fn log_message(message: &Response) {
    match message.error() {
        Some(error) => warn!(
            msg_type = message.msg_type(),
            req_id = message.req_id(),
            "Error message: {}",
            error
        ),
        None => info!(
            msg_type = message.msg_type(),
            req_id = message.req_id(),
            "Global message: {}",
            message
        ),
    }
}
