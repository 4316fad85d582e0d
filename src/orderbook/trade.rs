//! Trade entity and trade listener types.

use crate::types::{notional, OrderId, Price, Quantity, Side, TradeId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A single execution between a resting maker order and an incoming taker.
///
/// The price is always the maker's resting price. Within a symbol, trades
/// are totally ordered by emission order; the maker and taker sequence
/// numbers make interleaved audit replays unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Unique trade identifier
    pub trade_id: TradeId,
    /// Trading symbol
    pub symbol: String,
    /// Execution price (the maker's resting price)
    pub price: Price,
    /// Executed quantity
    pub quantity: Quantity,
    /// Side of the incoming (liquidity-removing) order
    pub aggressor_side: Side,
    /// Identifier of the resting order
    pub maker_order_id: OrderId,
    /// Identifier of the incoming order
    pub taker_order_id: OrderId,
    /// Acceptance sequence of the maker
    pub maker_sequence: u64,
    /// Acceptance sequence of the taker
    pub taker_sequence: u64,
    /// Execution timestamp, milliseconds since the Unix epoch
    pub timestamp_ms: u64,
}

impl Trade {
    /// The notional value of this trade: `price * quantity`, exact.
    #[inline]
    pub fn notional_value(&self) -> Decimal {
        notional(self.price, self.quantity)
    }

    /// Serialize the trade to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Callback invoked for each emitted trade, in emission order.
pub type TradeListener = Arc<dyn Fn(&Trade) + Send + Sync>;

/// A trade wrapped with the time it was handed to the dispatch layer.
///
/// Used by the channel-based dispatchers to move trades off the matching
/// thread while preserving per-symbol emission order.
#[derive(Debug, Clone)]
pub struct TradeEvent {
    /// The executed trade
    pub trade: Trade,
    /// When the event entered the dispatch queue, milliseconds since epoch
    pub received_at_ms: u64,
}
