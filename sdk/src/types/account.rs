//! Account types.
//!
//! Provides the `authorize` and `balance` payloads.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account details returned by a successful `authorize` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Authorize {
    /// Login id of the authorized account.
    pub loginid: String,

    /// Account currency.
    #[serde(default)]
    pub currency: String,

    /// Account balance.
    #[serde(default)]
    pub balance: Decimal,

    /// Account email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Account holder name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,

    /// Whether this is a virtual (demo) account (0 or 1).
    #[serde(default)]
    pub is_virtual: u8,

    /// Landing company short name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landing_company_name: Option<String>,
}

impl Authorize {
    /// Returns true for demo accounts.
    #[must_use]
    pub const fn is_demo(&self) -> bool {
        self.is_virtual == 1
    }
}

/// Account balance, either a one-off reply or a streamed update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    /// Current balance.
    pub balance: Decimal,

    /// Balance currency.
    pub currency: String,

    /// Login id the balance belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loginid: Option<String>,

    /// Stream id when subscribed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_deserialize() {
        let json = r#"{
            "loginid": "VRTC1234",
            "currency": "USD",
            "balance": 10000,
            "email": "demo@example.com",
            "fullname": "",
            "is_virtual": 1,
            "landing_company_name": "virtual",
            "scopes": ["read", "trade"]
        }"#;

        let auth: Authorize = serde_json::from_str(json).expect("deserialize");
        assert_eq!(auth.loginid, "VRTC1234");
        assert_eq!(auth.balance, Decimal::from(10_000));
        assert!(auth.is_demo());
    }

    #[test]
    fn test_authorize_minimal() {
        let auth: Authorize =
            serde_json::from_str(r#"{"loginid": "CR90000"}"#).expect("deserialize");
        assert!(!auth.is_demo());
        assert!(auth.email.is_none());
        assert_eq!(auth.balance, Decimal::ZERO);
    }

    #[test]
    fn test_balance_deserialize() {
        let json = r#"{"balance": 9876.5, "currency": "USD", "loginid": "VRTC1234"}"#;
        let balance: Balance = serde_json::from_str(json).expect("deserialize");
        assert_eq!(balance.balance, Decimal::new(98_765, 1));
        assert_eq!(balance.currency, "USD");
        assert!(balance.id.is_none());
    }
}
