//! Depth snapshots for market data.

use crate::types::{Price, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A point-in-time view of the top of an order book.
///
/// Levels are `(price, aggregate_quantity)` pairs sorted best-first: bids
/// descending, asks ascending. Book-update callbacks receive this same shape,
/// constructed under the book's guard and handed off by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthSnapshot {
    /// The symbol this snapshot belongs to
    pub symbol: String,

    /// When the snapshot was taken, milliseconds since the Unix epoch
    pub timestamp_ms: u64,

    /// Best bid price, if any
    pub best_bid: Option<Price>,

    /// Best ask price, if any
    pub best_ask: Option<Price>,

    /// Top bid levels, highest price first
    pub bids: Vec<(Price, Quantity)>,

    /// Top ask levels, lowest price first
    pub asks: Vec<(Price, Quantity)>,
}

impl DepthSnapshot {
    /// The spread (best ask - best bid), exact.
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_bid, self.best_ask) {
            (Some(bid), Some(ask)) => Some(ask.value() - bid.value()),
            _ => None,
        }
    }

    /// The mid price (average of best bid and best ask), exact.
    pub fn mid_price(&self) -> Option<Decimal> {
        match (self.best_bid, self.best_ask) {
            (Some(bid), Some(ask)) => Some((bid.value() + ask.value()) / Decimal::TWO),
            _ => None,
        }
    }

    /// Aggregate quantity across the included bid levels.
    pub fn total_bid_quantity(&self) -> Quantity {
        self.bids
            .iter()
            .fold(Quantity::ZERO, |total, (_, quantity)| total + *quantity)
    }

    /// Aggregate quantity across the included ask levels.
    pub fn total_ask_quantity(&self) -> Quantity {
        self.asks
            .iter()
            .fold(Quantity::ZERO, |total, (_, quantity)| total + *quantity)
    }

    /// Serialize the snapshot to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize a snapshot from JSON.
    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn price(value: Decimal) -> Price {
        Price::new(value).unwrap()
    }

    fn quantity(value: Decimal) -> Quantity {
        Quantity::new(value).unwrap()
    }

    fn snapshot() -> DepthSnapshot {
        DepthSnapshot {
            symbol: "BTC-USDT".to_string(),
            timestamp_ms: 1_700_000_000_000,
            best_bid: Some(price(dec!(50000))),
            best_ask: Some(price(dec!(50010))),
            bids: vec![
                (price(dec!(50000)), quantity(dec!(1.5))),
                (price(dec!(49990)), quantity(dec!(2.0))),
            ],
            asks: vec![(price(dec!(50010)), quantity(dec!(0.5)))],
        }
    }

    #[test]
    fn spread_and_mid_price_are_exact() {
        let snapshot = snapshot();
        assert_eq!(snapshot.spread(), Some(dec!(10)));
        assert_eq!(snapshot.mid_price(), Some(dec!(50005)));
    }

    #[test]
    fn totals_sum_included_levels() {
        let snapshot = snapshot();
        assert_eq!(snapshot.total_bid_quantity().value(), dec!(3.5));
        assert_eq!(snapshot.total_ask_quantity().value(), dec!(0.5));
    }

    #[test]
    fn json_round_trip() {
        let snapshot = snapshot();
        let json = snapshot.to_json().unwrap();
        let restored = DepthSnapshot::from_json(&json).unwrap();
        assert_eq!(snapshot, restored);
    }

    #[test]
    fn one_sided_snapshot_has_no_spread() {
        let mut snapshot = snapshot();
        snapshot.best_bid = None;
        snapshot.bids.clear();
        assert_eq!(snapshot.spread(), None);
        assert_eq!(snapshot.mid_price(), None);
    }
}
