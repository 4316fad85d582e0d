//! Order submission request and result types.

use crate::orderbook::Trade;
use crate::types::{OrderId, OrderStatus, OrderType, Side};
use serde::{Deserialize, Serialize};

/// An order submission as it arrives from the API collaborator.
///
/// Fields are the raw wire strings; the engine owns all validation and
/// parsing so that transport layers stay thin. Decimal fields keep their
/// text form until they pass the scale and bounds checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Trading symbol, e.g. `BTC-USDT`
    pub symbol: String,
    /// One of `market`, `limit`, `ioc`, `fok`
    pub order_type: String,
    /// One of `buy`, `sell`
    pub side: String,
    /// Order quantity as a decimal string
    pub quantity: String,
    /// Limit price as a decimal string; required for priced types, ignored
    /// for market orders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Caller-supplied order id; must be unique among live orders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

impl OrderRequest {
    fn new(
        symbol: &str,
        order_type: OrderType,
        side: Side,
        quantity: &str,
        price: Option<&str>,
    ) -> Self {
        Self {
            symbol: symbol.to_string(),
            order_type: order_type.to_string(),
            side: side.to_string(),
            quantity: quantity.to_string(),
            price: price.map(str::to_string),
            order_id: None,
        }
    }

    /// Build a market order request.
    pub fn market(symbol: &str, side: Side, quantity: &str) -> Self {
        Self::new(symbol, OrderType::Market, side, quantity, None)
    }

    /// Build a limit order request.
    pub fn limit(symbol: &str, side: Side, quantity: &str, price: &str) -> Self {
        Self::new(symbol, OrderType::Limit, side, quantity, Some(price))
    }

    /// Build an immediate-or-cancel order request.
    pub fn ioc(symbol: &str, side: Side, quantity: &str, price: &str) -> Self {
        Self::new(symbol, OrderType::Ioc, side, quantity, Some(price))
    }

    /// Build a fill-or-kill order request.
    pub fn fok(symbol: &str, side: Side, quantity: &str, price: &str) -> Self {
        Self::new(symbol, OrderType::Fok, side, quantity, Some(price))
    }

    /// Attach a caller-supplied order id.
    pub fn with_order_id(mut self, order_id: &str) -> Self {
        self.order_id = Some(order_id.to_string());
        self
    }
}

/// The outcome of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    /// The order's identifier (caller-supplied or engine-assigned)
    pub order_id: OrderId,
    /// Terminal or resting status the order reached
    pub status: OrderStatus,
    /// Trades emitted by this submission, in emission order
    pub trades: Vec<Trade>,
}
