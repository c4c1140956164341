//! Account token registry.
//!
//! Keeps the API tokens of the accounts a user has linked, in the order they
//! were stored. Tokens are held in memory only; nothing here refreshes or
//! expires them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SdkError;
use crate::ws::ApiRequest;

/// API token for one trading account.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    /// Account login id (e.g., "CR123456").
    pub account: String,

    /// API token.
    pub token: String,

    /// Account currency.
    pub currency: String,
}

impl AuthToken {
    /// Creates a token entry.
    #[must_use]
    pub fn new(
        account: impl Into<String>,
        token: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            token: token.into(),
            currency: currency.into(),
        }
    }

    /// Builds the `authorize` request for this token.
    #[must_use]
    pub fn authorize_request(&self) -> ApiRequest {
        ApiRequest::authorize(self.token.clone())
    }

    fn validate(&self) -> Result<(), SdkError> {
        if self.account.is_empty() {
            return Err(SdkError::InvalidToken("account cannot be empty".to_string()));
        }
        if self.token.is_empty() {
            return Err(SdkError::InvalidToken(format!(
                "token for {} cannot be empty",
                self.account
            )));
        }
        Ok(())
    }
}

// Tokens are credentials; keep them out of logs.
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("account", &self.account)
            .field("token", &"***")
            .field("currency", &self.currency)
            .finish()
    }
}

/// In-memory registry of account tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    tokens: Vec<AuthToken>,
}

impl TokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores tokens, replacing any entry for the same account in place.
    ///
    /// The batch is validated before anything is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry has an empty account or token.
    pub fn store<I>(&mut self, tokens: I) -> Result<(), SdkError>
    where
        I: IntoIterator<Item = AuthToken>,
    {
        let tokens: Vec<AuthToken> = tokens.into_iter().collect();
        for token in &tokens {
            token.validate()?;
        }

        for token in tokens {
            match self.tokens.iter_mut().find(|t| t.account == token.account) {
                Some(existing) => *existing = token,
                None => self.tokens.push(token),
            }
        }

        Ok(())
    }

    /// Returns the token for `account`.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is not stored.
    pub fn get(&self, account: &str) -> Result<&AuthToken, SdkError> {
        self.tokens
            .iter()
            .find(|t| t.account == account)
            .ok_or_else(|| SdkError::UnknownAccount(account.to_string()))
    }

    /// Returns the first stored token.
    #[must_use]
    pub fn default_token(&self) -> Option<&AuthToken> {
        self.tokens.first()
    }

    /// Returns the stored account ids in order.
    #[must_use]
    pub fn accounts(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.account.as_str()).collect()
    }

    /// Returns the number of stored tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if no token is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Removes every token.
    pub fn clear(&mut self) {
        self.tokens.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_store_and_get() {
        let mut store = TokenStore::new();
        store
            .store([AuthToken::new("demo", "10000", "USD")])
            .expect("store");

        assert_eq!(store.len(), 1);
        let token = store.get("demo").expect("token");
        assert_eq!(token.currency, "USD");
        assert_eq!(store.default_token(), Some(token));
    }

    #[test]
    fn test_store_replaces_same_account_in_place() {
        let mut store = TokenStore::new();
        store
            .store([
                AuthToken::new("CR1", "a", "USD"),
                AuthToken::new("CR2", "b", "EUR"),
            ])
            .expect("store");
        store
            .store([AuthToken::new("CR1", "c", "USD")])
            .expect("store");

        assert_eq!(store.accounts(), vec!["CR1", "CR2"]);
        assert_eq!(store.get("CR1").expect("token").token, "c");
    }

    #[test]
    fn test_store_rejects_invalid_batch() {
        let mut store = TokenStore::new();
        let result = store.store([
            AuthToken::new("CR1", "a", "USD"),
            AuthToken::new("CR2", "", "USD"),
        ]);

        assert!(matches!(result, Err(SdkError::InvalidToken(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_unknown_account() {
        let store = TokenStore::new();
        assert_eq!(
            store.get("nope"),
            Err(SdkError::UnknownAccount("nope".to_string()))
        );
        assert!(store.default_token().is_none());
    }

    #[test]
    fn test_clear() {
        let mut store = TokenStore::new();
        store
            .store([AuthToken::new("CR1", "a", "USD")])
            .expect("store");
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_authorize_request() {
        let token = AuthToken::new("demo", "secret", "USD");
        let value = serde_json::to_value(token.authorize_request()).expect("serialize");
        assert_eq!(value, json!({"authorize": "secret"}));
    }

    #[test]
    fn test_debug_hides_token() {
        let token = AuthToken::new("demo", "secret", "USD");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("demo"));
    }
}
