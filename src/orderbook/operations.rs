//! Order book operations: adding, matching by order type, and cancelling.

use super::book::OrderBook;
use super::error::OrderBookError;
use super::price_level::PriceLevel;
use super::trade::Trade;
use crate::types::{Order, OrderId, OrderStatus, OrderType, Price, Side};
use tracing::trace;

impl OrderBook {
    /// Add a limit order: match first, then rest any residual on its own
    /// side at the tail of its price level.
    ///
    /// Returns the final order snapshot and the trades emitted by this
    /// submission, in emission order.
    ///
    /// # Errors
    /// - [`OrderBookError::InvalidOperation`] if the order's symbol or type
    ///   does not belong here, or the limit price is missing.
    /// - [`OrderBookError::DuplicateOrderId`] if an order with this id is
    ///   already resting.
    pub fn add_limit_order(
        &mut self,
        mut order: Order,
    ) -> Result<(Order, Vec<Trade>), OrderBookError> {
        self.check_incoming(&order, OrderType::Limit)?;
        let price = require_price(&order)?;

        trace!(symbol = %self.symbol, id = %order.id, side = %order.side,
               quantity = %order.quantity, price = %price, "adding limit order");

        let trades = self.execute_match(&mut order, Some(price));

        if !order.remaining_quantity().is_zero() {
            self.rest_order(price, order.clone());
        }

        Ok((order, trades))
    }

    /// Match a market order against the opposite side until it fills or
    /// liquidity runs out. The residual is never rested: a fully matched
    /// order ends `Filled`, anything else ends `Cancelled`.
    pub fn match_market_order(
        &mut self,
        mut order: Order,
    ) -> Result<(Order, Vec<Trade>), OrderBookError> {
        self.check_incoming(&order, OrderType::Market)?;

        trace!(symbol = %self.symbol, id = %order.id, side = %order.side,
               quantity = %order.quantity, "matching market order");

        let trades = self.execute_match(&mut order, None);

        if !order.remaining_quantity().is_zero() {
            order.status = OrderStatus::Cancelled;
            trace!(id = %order.id, residual = %order.remaining_quantity(),
                   "market order cancelled with unfilled residual");
        }

        Ok((order, trades))
    }

    /// Match an immediate-or-cancel order: one limit-priced matching pass,
    /// after which any residual is discarded. Terminal status is `Filled`
    /// iff fully matched, else `Cancelled`.
    pub fn match_ioc_order(
        &mut self,
        mut order: Order,
    ) -> Result<(Order, Vec<Trade>), OrderBookError> {
        self.check_incoming(&order, OrderType::Ioc)?;
        let price = require_price(&order)?;

        trace!(symbol = %self.symbol, id = %order.id, side = %order.side,
               quantity = %order.quantity, price = %price, "matching IOC order");

        let trades = self.execute_match(&mut order, Some(price));

        if !order.remaining_quantity().is_zero() {
            order.status = OrderStatus::Cancelled;
            trace!(id = %order.id, residual = %order.remaining_quantity(),
                   "IOC residual discarded");
        }

        Ok((order, trades))
    }

    /// Match a fill-or-kill order atomically: a non-mutating probe first
    /// accumulates the liquidity available at acceptable prices, and only
    /// when it covers the full quantity does the consuming pass run.
    /// Otherwise the order is cancelled with zero trades and the book is
    /// left untouched.
    pub fn match_fok_order(
        &mut self,
        mut order: Order,
    ) -> Result<(Order, Vec<Trade>), OrderBookError> {
        self.check_incoming(&order, OrderType::Fok)?;
        let price = require_price(&order)?;

        let available = self.fillable_quantity(order.side, order.quantity, Some(price));
        if available < order.quantity {
            order.status = OrderStatus::Cancelled;
            trace!(symbol = %self.symbol, id = %order.id, requested = %order.quantity,
                   available = %available, "FOK order not fillable, cancelled");
            return Ok((order, Vec::new()));
        }

        let trades = self.execute_match(&mut order, Some(price));
        assert!(
            order.is_fully_filled(),
            "FOK order {} left residual {} after a successful fillability probe",
            order.id,
            order.remaining_quantity()
        );

        Ok((order, trades))
    }

    /// Cancel a resting order: remove it from its price level and the order
    /// index, drop the level if it empties, and return the cancelled
    /// snapshot.
    ///
    /// # Errors
    /// Returns [`OrderBookError::OrderNotFound`] when the id is unknown or
    /// the order already reached a terminal state.
    pub fn cancel_order(&mut self, order_id: &OrderId) -> Result<Order, OrderBookError> {
        let (price, side) = self
            .order_locations
            .remove(order_id)
            .ok_or_else(|| OrderBookError::OrderNotFound(order_id.clone()))?;

        let side_levels = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };

        // The index is maintained in lockstep with the levels; a dangling
        // entry means the core corrupted its own state.
        let level = side_levels.get_mut(&price).unwrap_or_else(|| {
            panic!("order {order_id} indexed at {price} {side} but the level is gone")
        });
        let mut order = level.remove(order_id).unwrap_or_else(|| {
            panic!("order {order_id} indexed at {price} {side} but absent from its level")
        });

        if level.is_empty() {
            side_levels.remove(&price);
        }

        order.status = OrderStatus::Cancelled;
        trace!(symbol = %self.symbol, id = %order_id, price = %price, side = %side,
               "order cancelled");

        Ok(order)
    }

    /// Rest an order at the tail of its price level and index it.
    fn rest_order(&mut self, price: Price, order: Order) {
        let side_levels = match order.side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };

        let order_id = order.id.clone();
        let side = order.side;
        side_levels
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price))
            .push_order(order);
        self.order_locations.insert(order_id, (price, side));
    }

    /// Shared admission checks for incoming orders.
    fn check_incoming(&self, order: &Order, expected: OrderType) -> Result<(), OrderBookError> {
        if order.symbol != self.symbol {
            return Err(OrderBookError::InvalidOperation {
                message: format!(
                    "order symbol {} does not match book symbol {}",
                    order.symbol, self.symbol
                ),
            });
        }
        if order.order_type != expected {
            return Err(OrderBookError::InvalidOperation {
                message: format!(
                    "expected a {} order, got {}",
                    expected, order.order_type
                ),
            });
        }
        if self.order_locations.contains_key(&order.id) {
            return Err(OrderBookError::DuplicateOrderId(order.id.clone()));
        }
        Ok(())
    }
}

/// Extract the limit price, which the engine guarantees for priced types.
fn require_price(order: &Order) -> Result<Price, OrderBookError> {
    order.price.ok_or_else(|| OrderBookError::InvalidOperation {
        message: format!("{} order {} has no price", order.order_type, order.id),
    })
}
