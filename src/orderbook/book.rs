//! Core OrderBook container: per-symbol price levels and read-side queries.

use crate::orderbook::price_level::PriceLevel;
use crate::orderbook::snapshot::DepthSnapshot;
use crate::types::{Order, OrderId, Price, Quantity, Side, TradeIdGenerator};
use crate::utils::current_time_millis;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use tracing::info;

/// The OrderBook holds the bid and ask sides for one symbol and enforces
/// strict price-time priority across them.
///
/// Each side is an ordered map keyed by price, so the best bid is the last
/// bid key and the best ask is the first ask key, and depth iteration comes
/// out already sorted. A flat order-id index gives O(1) lookup on cancel.
///
/// All mutation happens through the operations in
/// [`operations`](crate::orderbook::operations) inside the owner's critical
/// section; the book itself carries no internal locking.
#[derive(Debug)]
pub struct OrderBook {
    /// The symbol or identifier for this order book
    pub(super) symbol: String,

    /// Bid side price levels (buy orders); best bid is the highest key
    pub(super) bids: BTreeMap<Price, PriceLevel>,

    /// Ask side price levels (sell orders); best ask is the lowest key
    pub(super) asks: BTreeMap<Price, PriceLevel>,

    /// Map from order id to (price, side) for O(1) cancel lookups
    pub(super) order_locations: HashMap<OrderId, (Price, Side)>,

    /// The last price at which a trade occurred
    pub(super) last_trade_price: Option<Price>,

    /// Generator for unique trade identifiers
    pub(super) trade_id_generator: TradeIdGenerator,
}

impl OrderBook {
    /// Create a new order book for the given symbol.
    pub fn new(symbol: &str) -> Self {
        info!(symbol, "initialized order book");
        Self {
            symbol: symbol.to_string(),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            order_locations: HashMap::new(),
            last_trade_price: None,
            trade_id_generator: TradeIdGenerator::default(),
        }
    }

    /// Create a new order book with an explicit trade id generator.
    ///
    /// Pass a seeded generator for deterministic, replayable trade ids.
    pub fn with_trade_id_generator(symbol: &str, generator: TradeIdGenerator) -> Self {
        let mut book = Self::new(symbol);
        book.trade_id_generator = generator;
        book
    }

    /// Get the symbol of this order book
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Get the best bid price, if any. O(log P).
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.keys().next_back().copied()
    }

    /// Get the best ask price, if any. O(log P).
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.keys().next().copied()
    }

    /// Best bid and best ask together.
    pub fn bbo(&self) -> (Option<Price>, Option<Price>) {
        (self.best_bid(), self.best_ask())
    }

    /// The spread (best ask - best bid), exact.
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask.value() - bid.value()),
            _ => None,
        }
    }

    /// The mid price (average of best bid and best ask), exact.
    pub fn mid_price(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid.value() + ask.value()) / Decimal::TWO),
            _ => None,
        }
    }

    /// The last traded price, if any trade has occurred.
    pub fn last_trade_price(&self) -> Option<Price> {
        self.last_trade_price
    }

    /// Look up a resting order by id.
    pub fn get_order(&self, order_id: &OrderId) -> Option<&Order> {
        let (price, side) = self.order_locations.get(order_id)?;
        let level = match side {
            Side::Buy => self.bids.get(price)?,
            Side::Sell => self.asks.get(price)?,
        };
        level.find(order_id)
    }

    /// Whether an order with this id is resting in the book.
    pub fn contains_order(&self, order_id: &OrderId) -> bool {
        self.order_locations.contains_key(order_id)
    }

    /// Number of resting orders across both sides.
    pub fn order_count(&self) -> usize {
        self.order_locations.len()
    }

    /// Number of populated bid price levels.
    pub fn bid_level_count(&self) -> usize {
        self.bids.len()
    }

    /// Number of populated ask price levels.
    pub fn ask_level_count(&self) -> usize {
        self.asks.len()
    }

    /// Aggregate open quantity across all bid levels.
    pub fn total_bid_quantity(&self) -> Quantity {
        self.bids
            .values()
            .fold(Quantity::ZERO, |total, level| total + level.total_quantity())
    }

    /// Aggregate open quantity across all ask levels.
    pub fn total_ask_quantity(&self) -> Quantity {
        self.asks
            .values()
            .fold(Quantity::ZERO, |total, level| total + level.total_quantity())
    }

    /// Take a depth snapshot of the top `levels` price levels per side.
    ///
    /// Levels come out best-first: bids descending, asks ascending. Ties
    /// within a level are not expanded; each entry is the level's aggregate.
    pub fn depth(&self, levels: usize) -> DepthSnapshot {
        let bids = self
            .bids
            .iter()
            .rev()
            .take(levels)
            .map(|(price, level)| (*price, level.total_quantity()))
            .collect();
        let asks = self
            .asks
            .iter()
            .take(levels)
            .map(|(price, level)| (*price, level.total_quantity()))
            .collect();

        DepthSnapshot {
            symbol: self.symbol.clone(),
            timestamp_ms: current_time_millis(),
            best_bid: self.best_bid(),
            best_ask: self.best_ask(),
            bids,
            asks,
        }
    }
}
