//! Price tick types.
//!
//! Provides streamed tick updates and tick history snapshots.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single price update for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Symbol code.
    pub symbol: String,

    /// Quoted price.
    pub quote: Decimal,

    /// Epoch seconds of the quote.
    pub epoch: i64,

    /// Ask price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ask: Option<Decimal>,

    /// Bid price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid: Option<Decimal>,

    /// Stream id, present when the tick belongs to a subscription.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Number of decimal places of the quote.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pip_size: Option<u32>,
}

impl Tick {
    /// Returns the quote time.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.epoch, 0)
    }

    /// Returns the ask/bid spread if both sides are present.
    #[must_use]
    pub fn spread(&self) -> Option<Decimal> {
        match (self.ask, self.bid) {
            (Some(ask), Some(bid)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Returns the quote rounded to the advertised pip size.
    #[must_use]
    pub fn rounded_quote(&self) -> Decimal {
        match self.pip_size {
            Some(dp) => self.quote.round_dp(dp),
            None => self.quote,
        }
    }
}

/// Tick history as returned by `ticks_history` with the `ticks` style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickHistory {
    /// Quoted prices, oldest first.
    #[serde(default)]
    pub prices: Vec<Decimal>,

    /// Epoch seconds matching `prices`.
    #[serde(default)]
    pub times: Vec<i64>,
}

impl TickHistory {
    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len().min(self.times.len())
    }

    /// Returns true if the history has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over `(epoch, price)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (i64, Decimal)> + '_ {
        self.times.iter().copied().zip(self.prices.iter().copied())
    }

    /// Returns the most recent price.
    #[must_use]
    pub fn last_price(&self) -> Option<Decimal> {
        self.points().last().map(|(_, price)| price)
    }
}
