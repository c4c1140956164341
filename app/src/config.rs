//! Application configuration.
//!
//! Loads connection settings and the account token from the environment.

use std::env;

use derivws_sdk::{AuthToken, WsConfig};
use derivws_sdk::ws::DEFAULT_WS_URL;
use serde::{Deserialize, Serialize};

/// Environment variable holding the application id.
pub const ENV_APP_ID: &str = "DERIV_APP_ID";
/// Environment variable holding the endpoint URL.
pub const ENV_WS_URL: &str = "DERIV_WS_URL";
/// Environment variable holding the API token.
pub const ENV_API_TOKEN: &str = "DERIV_API_TOKEN";
/// Environment variable holding the account id for the token.
pub const ENV_ACCOUNT: &str = "DERIV_ACCOUNT";
/// Environment variable holding the account currency.
pub const ENV_CURRENCY: &str = "DERIV_CURRENCY";
/// Environment variable holding a symbol to stream ticks for.
pub const ENV_SYMBOL: &str = "DERIV_SYMBOL";

/// Application configuration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application id.
    pub app_id: String,

    /// Endpoint URL.
    pub ws_url: String,

    /// API token used to authorize the session.
    pub api_token: Option<String>,

    /// Account the token belongs to.
    pub account: String,

    /// Account currency.
    pub currency: String,

    /// Symbol to stream ticks for.
    pub symbol: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("app_id", &self.app_id)
            .field("ws_url", &self.ws_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .field("account", &self.account)
            .field("currency", &self.currency)
            .field("symbol", &self.symbol)
            .finish()
    }
}

impl AppConfig {
    /// Creates a configuration with defaults for everything but the app id.
    #[must_use]
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            ws_url: DEFAULT_WS_URL.to_string(),
            api_token: None,
            account: "demo".to_string(),
            currency: "USD".to_string(),
            symbol: None,
        }
    }

    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the app id is missing or the result is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration through `lookup`.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the app id is missing or the result is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let app_id = get(ENV_APP_ID).ok_or(ConfigError::MissingAppId)?;
        let mut config = Self::new(app_id);

        if let Some(url) = get(ENV_WS_URL) {
            config.ws_url = url;
        }
        config.api_token = get(ENV_API_TOKEN);
        if let Some(account) = get(ENV_ACCOUNT) {
            config.account = account;
        }
        if let Some(currency) = get(ENV_CURRENCY) {
            config.currency = currency;
        }
        config.symbol = get(ENV_SYMBOL);

        config.validate()?;
        Ok(config)
    }

    /// Sets the API token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the endpoint URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.ws_url = url.into();
        self
    }

    /// Sets the symbol to stream.
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Returns the multiplexer configuration.
    #[must_use]
    pub fn ws_config(&self) -> WsConfig {
        WsConfig::new(self.app_id.clone()).with_url(self.ws_url.clone())
    }

    /// Returns the account token, if one is configured.
    #[must_use]
    pub fn auth_token(&self) -> Option<AuthToken> {
        self.api_token
            .as_ref()
            .map(|token| AuthToken::new(self.account.clone(), token.clone(), self.currency.clone()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ws_config()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.currency.len() != 3 {
            return Err(ConfigError::InvalidCurrency(self.currency.clone()));
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Application id not set.
    #[error("DERIV_APP_ID must be set")]
    MissingAppId,

    /// Currency code is not three letters.
    #[error("invalid currency: {0}")]
    InvalidCurrency(String),

    /// Connection settings rejected.
    #[error("{0}")]
    Invalid(String),
}
