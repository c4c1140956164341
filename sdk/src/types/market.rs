//! Market types.
//!
//! Provides the `active_symbols` entry and helpers for browsing markets.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A tradable symbol as listed by `active_symbols`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveSymbol {
    /// Symbol code (e.g., "R_100").
    pub symbol: String,

    /// Human-readable name.
    pub display_name: String,

    /// Market code (e.g., "synthetic_index").
    pub market: String,

    /// Human-readable market name.
    #[serde(default)]
    pub market_display_name: String,

    /// Submarket code.
    #[serde(default)]
    pub submarket: String,

    /// Human-readable submarket name.
    #[serde(default)]
    pub submarket_display_name: String,

    /// Whether the exchange is open (0 or 1).
    #[serde(default)]
    pub exchange_is_open: u8,

    /// Whether trading is suspended (0 or 1).
    #[serde(default)]
    pub is_trading_suspended: u8,

    /// Pip size.
    #[serde(default)]
    pub pip: Decimal,
}

impl ActiveSymbol {
    /// Returns true if the symbol can be traded right now.
    #[must_use]
    pub fn is_tradable(&self) -> bool {
        self.exchange_is_open == 1 && self.is_trading_suspended == 0
    }

    /// Returns the number of decimal places implied by the pip size.
    #[must_use]
    pub fn decimals(&self) -> u32 {
        self.pip.normalize().scale()
    }
}

impl fmt::Display for ActiveSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.symbol)
    }
}

/// Groups symbols by market display name, preserving listing order within a group.
#[must_use]
pub fn group_by_market(symbols: &[ActiveSymbol]) -> BTreeMap<&str, Vec<&ActiveSymbol>> {
    let mut groups: BTreeMap<&str, Vec<&ActiveSymbol>> = BTreeMap::new();
    for symbol in symbols {
        let key = if symbol.market_display_name.is_empty() {
            symbol.market.as_str()
        } else {
            symbol.market_display_name.as_str()
        };
        groups.entry(key).or_default().push(symbol);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(code: &str, market: &str, open: u8) -> ActiveSymbol {
        ActiveSymbol {
            symbol: code.to_string(),
            display_name: format!("{} Index", code),
            market: market.to_lowercase(),
            market_display_name: market.to_string(),
            submarket: "random_index".to_string(),
            submarket_display_name: "Continuous Indices".to_string(),
            exchange_is_open: open,
            is_trading_suspended: 0,
            pip: Decimal::new(1, 2),
        }
    }

    #[test]
    fn test_active_symbol_deserialize() {
        let json = r#"{
            "symbol": "R_100",
            "display_name": "Volatility 100 Index",
            "market": "synthetic_index",
            "market_display_name": "Derived",
            "submarket": "random_index",
            "submarket_display_name": "Continuous Indices",
            "exchange_is_open": 1,
            "is_trading_suspended": 0,
            "pip": 0.01,
            "symbol_type": "stockindex"
        }"#;

        let parsed: ActiveSymbol = serde_json::from_str(json).expect("deserialize");
        assert_eq!(parsed.symbol, "R_100");
        assert!(parsed.is_tradable());
        assert_eq!(parsed.decimals(), 2);
    }

    #[test]
    fn test_active_symbol_closed() {
        let parsed = symbol("frxEURUSD", "Forex", 0);
        assert!(!parsed.is_tradable());
    }

    #[test]
    fn test_active_symbol_display() {
        let parsed = symbol("R_50", "Derived", 1);
        assert_eq!(parsed.to_string(), "R_50 Index (R_50)");
    }

    #[test]
    fn test_group_by_market() {
        let symbols = vec![
            symbol("R_100", "Derived", 1),
            symbol("frxEURUSD", "Forex", 1),
            symbol("R_50", "Derived", 1),
        ];

        let groups = group_by_market(&symbols);
        assert_eq!(groups.len(), 2);

        let derived: Vec<&str> = groups["Derived"].iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(derived, vec!["R_100", "R_50"]);
        assert_eq!(groups["Forex"].len(), 1);
    }
}
