//! Order entity and its supporting enums.

use crate::types::decimal::{Price, Quantity};
use crate::types::id::OrderId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the book an order belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// An order to purchase the base asset
    Buy,
    /// An order to sell the base asset
    Sell,
}

impl Side {
    /// The opposite side of the book.
    #[inline]
    pub fn opposite(&self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Parse a side from its wire form (case-insensitive).
    pub fn parse(text: &str) -> Option<Side> {
        match text.to_ascii_lowercase().as_str() {
            "buy" => Some(Side::Buy),
            "sell" => Some(Side::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("buy"),
            Side::Sell => f.write_str("sell"),
        }
    }
}

/// Supported order types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Execute immediately at the best available prices; never rests
    Market,
    /// Execute at the limit price or better; residual rests on the book
    Limit,
    /// Immediate-or-cancel: match what is possible now, discard the rest
    Ioc,
    /// Fill-or-kill: match the whole quantity atomically, or nothing
    Fok,
}

impl OrderType {
    /// Whether this order type carries a limit price.
    #[inline]
    pub fn requires_price(&self) -> bool {
        matches!(self, OrderType::Limit | OrderType::Ioc | OrderType::Fok)
    }

    /// Parse an order type from its wire form (case-insensitive).
    pub fn parse(text: &str) -> Option<OrderType> {
        match text.to_ascii_lowercase().as_str() {
            "market" => Some(OrderType::Market),
            "limit" => Some(OrderType::Limit),
            "ioc" => Some(OrderType::Ioc),
            "fok" => Some(OrderType::Fok),
            _ => None,
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Market => f.write_str("market"),
            OrderType::Limit => f.write_str("limit"),
            OrderType::Ioc => f.write_str("ioc"),
            OrderType::Fok => f.write_str("fok"),
        }
    }
}

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Accepted, not yet touched by the match loop (or resting unfilled)
    Pending,
    /// Some quantity has executed, some remains
    PartiallyFilled,
    /// The whole quantity executed
    Filled,
    /// Removed with unexecuted quantity remaining
    Cancelled,
    /// Refused before touching the book
    Rejected,
}

impl OrderStatus {
    /// Whether this status ends the order's lifecycle.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Filled | OrderStatus::Cancelled | OrderStatus::Rejected
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => f.write_str("pending"),
            OrderStatus::PartiallyFilled => f.write_str("partially_filled"),
            OrderStatus::Filled => f.write_str("filled"),
            OrderStatus::Cancelled => f.write_str("cancelled"),
            OrderStatus::Rejected => f.write_str("rejected"),
        }
    }
}

/// A trading order.
///
/// Orders are created by the engine at acceptance and mutated only inside a
/// book's critical section. `sequence` is assigned engine-wide and defines
/// time priority even when wall-clock timestamps tie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier
    pub id: OrderId,
    /// Trading symbol, e.g. `BTC-USDT`
    pub symbol: String,
    /// Order type
    pub order_type: OrderType,
    /// Buy or sell
    pub side: Side,
    /// Original quantity, strictly positive
    pub quantity: Quantity,
    /// Limit price; `None` for market orders
    pub price: Option<Price>,
    /// Quantity executed so far
    pub filled_quantity: Quantity,
    /// Current lifecycle status
    pub status: OrderStatus,
    /// Engine-wide acceptance sequence number
    pub sequence: u64,
    /// Acceptance timestamp, milliseconds since the Unix epoch
    pub timestamp_ms: u64,
}

impl Order {
    /// Create a freshly accepted order with no fills.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: OrderId,
        symbol: impl Into<String>,
        order_type: OrderType,
        side: Side,
        quantity: Quantity,
        price: Option<Price>,
        sequence: u64,
        timestamp_ms: u64,
    ) -> Self {
        Self {
            id,
            symbol: symbol.into(),
            order_type,
            side,
            quantity,
            price,
            filled_quantity: Quantity::ZERO,
            status: OrderStatus::Pending,
            sequence,
            timestamp_ms,
        }
    }

    /// Quantity still open.
    #[inline]
    pub fn remaining_quantity(&self) -> Quantity {
        self.quantity - self.filled_quantity
    }

    /// Whether the whole quantity has executed.
    #[inline]
    pub fn is_fully_filled(&self) -> bool {
        self.remaining_quantity().is_zero()
    }

    /// Record an execution against this order and advance its status.
    ///
    /// Panics if `quantity` exceeds the remaining open quantity; that is a
    /// matching-core invariant violation, not a recoverable condition.
    pub(crate) fn fill(&mut self, quantity: Quantity) {
        match self.remaining_quantity().checked_sub(quantity) {
            Some(_) => {
                self.filled_quantity += quantity;
                self.status = if self.is_fully_filled() {
                    OrderStatus::Filled
                } else {
                    OrderStatus::PartiallyFilled
                };
            }
            None => panic!(
                "order {}: fill of {} exceeds remaining {}",
                self.id,
                quantity,
                self.remaining_quantity()
            ),
        }
    }

    /// Serialize the order to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
