//! WebSocket configuration.
//!
//! Provides configuration options for the multiplexer.

use super::error::WsError;

/// Default WebSocket endpoint.
pub const DEFAULT_WS_URL: &str = "wss://ws.derivws.com/websockets/v3";

/// Name of the identifier field injected into outgoing requests.
pub const REQ_ID_FIELD: &str = "req_id";

/// WebSocket configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WsConfig {
    /// WebSocket endpoint, without the `app_id` query parameter.
    pub url: String,

    /// Application id registered with the platform.
    pub app_id: String,

    /// Optional language code passed as the `l` query parameter.
    pub language: Option<String>,
}

impl WsConfig {
    /// Creates a configuration for the default endpoint.
    #[must_use]
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            url: DEFAULT_WS_URL.to_string(),
            app_id: app_id.into(),
            language: None,
        }
    }

    /// Sets the endpoint URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the language code.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Returns the connection URL with the application id appended.
    ///
    /// An endpoint without a path gets `/` so the handshake request line
    /// stays valid.
    #[must_use]
    pub fn connection_url(&self) -> String {
        let (base, query) = match self.url.split_once('?') {
            Some((base, query)) => (base, query),
            None => (self.url.as_str(), ""),
        };
        let authority = base.find("://").map_or(0, |i| i + 3);
        let path = if base[authority..].contains('/') { "" } else { "/" };

        let mut url = format!("{}{}?", base, path);
        if !query.is_empty() {
            url.push_str(query);
            url.push('&');
        }
        url.push_str("app_id=");
        url.push_str(&self.app_id);
        if let Some(language) = &self.language {
            url.push_str("&l=");
            url.push_str(language);
        }
        url
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), WsError> {
        if self.url.is_empty() {
            return Err(WsError::InvalidConfig("url cannot be empty".to_string()));
        }

        if !self.url.starts_with("ws://") && !self.url.starts_with("wss://") {
            return Err(WsError::InvalidConfig(
                "url must start with ws:// or wss://".to_string(),
            ));
        }

        if self.app_id.is_empty() {
            return Err(WsError::InvalidConfig(
                "app_id cannot be empty".to_string(),
            ));
        }

        if !self.app_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(WsError::InvalidConfig(format!(
                "app_id must be numeric, got {}",
                self.app_id
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = WsConfig::new("76505");
        assert_eq!(config.url, DEFAULT_WS_URL);
        assert_eq!(config.app_id, "76505");
        assert!(config.language.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = WsConfig::new("1089")
            .with_url("ws://127.0.0.1:9000/ws")
            .with_language("EN");

        assert_eq!(config.url, "ws://127.0.0.1:9000/ws");
        assert_eq!(config.language, Some("EN".to_string()));
    }

    #[test]
    fn test_config_connection_url() {
        let config = WsConfig::new("76505");
        assert_eq!(
            config.connection_url(),
            "wss://ws.derivws.com/websockets/v3?app_id=76505"
        );
    }

    #[test]
    fn test_config_connection_url_with_existing_params() {
        let config = WsConfig::new("1089")
            .with_url("wss://example.com/ws?brand=x")
            .with_language("DE");
        assert_eq!(
            config.connection_url(),
            "wss://example.com/ws?brand=x&app_id=1089&l=DE"
        );
    }

    #[test]
    fn test_config_connection_url_without_path() {
        let config = WsConfig::new("1089").with_url("ws://127.0.0.1:9000");
        assert_eq!(config.connection_url(), "ws://127.0.0.1:9000/?app_id=1089");

        let config = WsConfig::new("1089").with_url("wss://ws.derivws.com?brand=x");
        assert_eq!(
            config.connection_url(),
            "wss://ws.derivws.com/?brand=x&app_id=1089"
        );
    }

    #[test]
    fn test_config_validate_valid() {
        assert!(WsConfig::new("76505").validate().is_ok());
    }

    #[test]
    fn test_config_validate_empty_url() {
        let config = WsConfig::new("1089").with_url("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_invalid_scheme() {
        let config = WsConfig::new("1089").with_url("https://example.com/ws");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_app_id() {
        assert!(WsConfig::new("").validate().is_err());
        assert!(WsConfig::new("abc").validate().is_err());
    }
}
