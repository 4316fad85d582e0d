//! A FIFO queue of resting orders at a single price.

use crate::types::{Order, OrderId, Price, Quantity};
use std::collections::VecDeque;

/// All resting orders at one price on one side of the book.
///
/// Orders queue in arrival order; the head is always the oldest resting
/// order, which gives time priority within the level. `total_quantity` is
/// maintained incrementally and always equals the sum of the open quantities
/// of the queued orders.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    price: Price,
    orders: VecDeque<Order>,
    total_quantity: Quantity,
}

impl PriceLevel {
    /// Create an empty level at the given price.
    pub fn new(price: Price) -> Self {
        Self {
            price,
            orders: VecDeque::new(),
            total_quantity: Quantity::ZERO,
        }
    }

    /// The price shared by every order in this level.
    #[inline]
    pub fn price(&self) -> Price {
        self.price
    }

    /// Aggregate open quantity across the queue.
    #[inline]
    pub fn total_quantity(&self) -> Quantity {
        self.total_quantity
    }

    /// Number of resting orders.
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Whether the queue is empty. An empty level must be dropped by its side.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Append an order at the tail of the queue.
    pub fn push_order(&mut self, order: Order) {
        self.total_quantity += order.remaining_quantity();
        self.orders.push_back(order);
    }

    /// Peek the oldest resting order.
    #[inline]
    pub fn front(&self) -> Option<&Order> {
        self.orders.front()
    }

    /// Mutable access to the oldest resting order.
    #[inline]
    pub(super) fn front_mut(&mut self) -> Option<&mut Order> {
        self.orders.front_mut()
    }

    /// Remove and return the oldest resting order.
    pub fn pop_front(&mut self) -> Option<Order> {
        let order = self.orders.pop_front()?;
        self.total_quantity -= order.remaining_quantity();
        Some(order)
    }

    /// Remove an order from anywhere in the queue. O(n) in the level size;
    /// only the cancel path uses it.
    pub fn remove(&mut self, order_id: &OrderId) -> Option<Order> {
        let position = self.orders.iter().position(|order| &order.id == order_id)?;
        let order = self.orders.remove(position)?;
        self.total_quantity -= order.remaining_quantity();
        Some(order)
    }

    /// Shrink the aggregate total after a partial fill of a queued order.
    pub(super) fn reduce_total(&mut self, quantity: Quantity) {
        self.total_quantity -= quantity;
    }

    /// Find a resting order by id.
    pub fn find(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| &order.id == order_id)
    }

    /// Iterate the queue in time priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrderType, Side};
    use rust_decimal_macros::dec;

    fn level_price() -> Price {
        Price::new(dec!(100)).unwrap()
    }

    fn resting(id: &str, quantity: &str, sequence: u64) -> Order {
        Order::new(
            OrderId::from(id),
            "BTC-USDT",
            OrderType::Limit,
            Side::Buy,
            Quantity::parse(quantity, 8).unwrap(),
            Some(level_price()),
            sequence,
            0,
        )
    }

    #[test]
    fn push_maintains_fifo_and_total() {
        let mut level = PriceLevel::new(level_price());
        level.push_order(resting("a", "1.0", 1));
        level.push_order(resting("b", "2.5", 2));

        assert_eq!(level.order_count(), 2);
        assert_eq!(level.total_quantity().value(), dec!(3.5));
        assert_eq!(level.front().unwrap().id.as_str(), "a");
    }

    #[test]
    fn pop_front_removes_oldest() {
        let mut level = PriceLevel::new(level_price());
        level.push_order(resting("a", "1.0", 1));
        level.push_order(resting("b", "2.0", 2));

        let popped = level.pop_front().unwrap();
        assert_eq!(popped.id.as_str(), "a");
        assert_eq!(level.total_quantity().value(), dec!(2));
        assert_eq!(level.front().unwrap().id.as_str(), "b");
    }

    #[test]
    fn remove_mid_queue_keeps_total_consistent() {
        let mut level = PriceLevel::new(level_price());
        level.push_order(resting("a", "1.0", 1));
        level.push_order(resting("b", "2.0", 2));
        level.push_order(resting("c", "0.5", 3));

        let removed = level.remove(&OrderId::from("b")).unwrap();
        assert_eq!(removed.id.as_str(), "b");
        assert_eq!(level.order_count(), 2);
        assert_eq!(level.total_quantity().value(), dec!(1.5));
        assert!(level.remove(&OrderId::from("b")).is_none());
    }

    #[test]
    fn find_and_iter_preserve_queue_order() {
        let mut level = PriceLevel::new(level_price());
        level.push_order(resting("a", "1.0", 1));
        level.push_order(resting("b", "2.0", 2));

        assert_eq!(level.find(&OrderId::from("b")).unwrap().sequence, 2);
        assert!(level.find(&OrderId::from("ghost")).is_none());

        let ids: Vec<_> = level.iter().map(|order| order.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn total_tracks_partially_filled_orders() {
        let mut partially_filled = resting("a", "2.0", 1);
        partially_filled.fill(Quantity::parse("0.5", 8).unwrap());

        let mut level = PriceLevel::new(level_price());
        level.push_order(partially_filled);
        assert_eq!(level.total_quantity().value(), dec!(1.5));

        // Popping removes only the open remainder from the aggregate.
        let popped = level.pop_front().unwrap();
        assert_eq!(popped.filled_quantity.value(), dec!(0.5));
        assert!(level.total_quantity().is_zero());
        assert!(level.is_empty());
    }
}
