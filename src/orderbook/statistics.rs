//! Aggregate per-book statistics.

use crate::types::{Price, Quantity};
use crate::OrderBook;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A point-in-time statistical summary of one order book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookStatistics {
    /// The symbol this report belongs to
    pub symbol: String,
    /// Best bid price, if any
    pub best_bid: Option<Price>,
    /// Best ask price, if any
    pub best_ask: Option<Price>,
    /// Spread (best ask - best bid), if both sides are populated
    pub spread: Option<Decimal>,
    /// Number of populated bid price levels
    pub bid_levels: usize,
    /// Number of populated ask price levels
    pub ask_levels: usize,
    /// Aggregate open quantity across all bid levels
    pub total_bid_quantity: Quantity,
    /// Aggregate open quantity across all ask levels
    pub total_ask_quantity: Quantity,
    /// Number of resting orders across both sides
    pub resting_orders: usize,
    /// The last traded price, if any
    pub last_trade_price: Option<Price>,
}

impl OrderBook {
    /// Build a statistical summary of the book's current state.
    pub fn statistics(&self) -> BookStatistics {
        BookStatistics {
            symbol: self.symbol().to_string(),
            best_bid: self.best_bid(),
            best_ask: self.best_ask(),
            spread: self.spread(),
            bid_levels: self.bid_level_count(),
            ask_levels: self.ask_level_count(),
            total_bid_quantity: self.total_bid_quantity(),
            total_ask_quantity: self.total_ask_quantity(),
            resting_orders: self.order_count(),
            last_trade_price: self.last_trade_price(),
        }
    }
}
