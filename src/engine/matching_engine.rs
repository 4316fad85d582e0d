//! Multi-symbol matching engine: validation, routing, and event dispatch.

use crate::engine::config::EngineConfig;
use crate::engine::error::{EngineError, ValidationError};
use crate::engine::statistics::{EngineStatistics, StatisticsSnapshot};
use crate::engine::submission::{OrderRequest, SubmissionResult};
use crate::orderbook::{
    BookStatistics, BookUpdateListener, DepthSnapshot, OrderBook, Trade, TradeListener,
};
use crate::types::{Order, OrderId, OrderType, Price, Quantity, Side, TradeIdGenerator};
use crate::utils::current_time_millis;
use dashmap::DashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{info, trace, warn};

/// The multi-symbol matching engine.
///
/// The engine validates submissions, assigns identity and sequence, routes
/// each order to its symbol's book, and fans out trade and book-update
/// events to registered listeners. Books are created lazily on first use and
/// each sits behind its own guard, so symbols match independently; the
/// symbol registry guard is never held across a matching pass.
///
/// Construct one engine per process; tests build fresh engines.
pub struct MatchingEngine {
    /// Per-symbol books, each behind its own reader-writer guard
    books: DashMap<String, Arc<RwLock<OrderBook>>>,

    /// Validation bounds and snapshot defaults
    config: EngineConfig,

    /// Engine-wide acceptance sequence; defines time priority across ties
    sequence: AtomicU64,

    /// Seed for deterministic trade ids, when configured
    trade_id_seed: Option<u64>,

    /// Subscribers notified for each trade, in emission order
    trade_listeners: RwLock<Vec<TradeListener>>,

    /// Subscribers notified once per completed book mutation
    book_update_listeners: RwLock<Vec<BookUpdateListener>>,

    /// Activity counters
    statistics: EngineStatistics,
}

impl MatchingEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        info!(?config, "matching engine initialized");
        Self {
            books: DashMap::new(),
            config,
            sequence: AtomicU64::new(0),
            trade_id_seed: None,
            trade_listeners: RwLock::new(Vec::new()),
            book_update_listeners: RwLock::new(Vec::new()),
            statistics: EngineStatistics::new(),
        }
    }

    /// Create an engine whose books mint deterministic trade ids derived
    /// from `seed`. Intended for replayable tests; production engines should
    /// use [`MatchingEngine::new`] for collision-resistant ids.
    pub fn with_deterministic_ids(config: EngineConfig, seed: u64) -> Self {
        let mut engine = Self::new(config);
        engine.trade_id_seed = Some(seed);
        engine
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Register a callback invoked for every emitted trade, in emission
    /// order. Listener panics are caught and logged; they never reach the
    /// matching path.
    pub fn add_trade_listener(&self, listener: TradeListener) {
        self.trade_listeners
            .write()
            .expect("trade listener registry poisoned")
            .push(listener);
    }

    /// Register a callback invoked once per completed book mutation with a
    /// depth snapshot of the affected symbol.
    pub fn add_book_update_listener(&self, listener: BookUpdateListener) {
        self.book_update_listeners
            .write()
            .expect("book update listener registry poisoned")
            .push(listener);
    }

    /// Submit an order.
    ///
    /// Validation failures and duplicate ids return an error without
    /// touching any book. An accepted order runs its type-specific matching
    /// protocol inside the symbol's critical section; afterwards trade
    /// callbacks fire for each emitted trade followed by one book-update
    /// callback.
    pub fn submit_order(&self, request: OrderRequest) -> Result<SubmissionResult, EngineError> {
        self.statistics.record_received();

        let order = match self.build_order(&request) {
            Ok(order) => order,
            Err(err) => {
                self.statistics.record_rejected();
                warn!(symbol = %request.symbol, reason = err.reason_code(), %err,
                      "order rejected");
                return Err(err);
            }
        };

        let symbol = order.symbol.clone();
        let book_handle = self.book_handle(&symbol);

        let outcome = {
            let mut book = book_handle.write().expect("order book lock poisoned");
            let result = match order.order_type {
                OrderType::Limit => book.add_limit_order(order),
                OrderType::Market => book.match_market_order(order),
                OrderType::Ioc => book.match_ioc_order(order),
                OrderType::Fok => book.match_fok_order(order),
            };
            // The book-update snapshot must be taken under the same guard as
            // the mutation so subscribers never observe a torn book.
            result.map(|(order, trades)| (order, trades, book.depth(self.config.default_depth)))
        };

        let (order, trades, update) = match outcome {
            Ok(parts) => parts,
            Err(err) => {
                self.statistics.record_rejected();
                warn!(symbol = %symbol, %err, "order rejected by book");
                return Err(EngineError::Book(err));
            }
        };

        self.statistics.record_accepted(&symbol);
        self.statistics.record_trades(&symbol, &trades);
        trace!(symbol = %symbol, order_id = %order.id, status = %order.status,
               trades = trades.len(), "order processed");

        self.notify_trades(&trades);
        self.notify_book_update(&update);

        Ok(SubmissionResult {
            order_id: order.id,
            status: order.status,
            trades,
        })
    }

    /// Cancel a resting order on the given symbol.
    ///
    /// Atomic with respect to matching on that symbol: the order is either
    /// removed before any further match touches it, or the call fails with
    /// not-found because it already terminated.
    pub fn cancel_order(&self, order_id: &OrderId, symbol: &str) -> Result<Order, EngineError> {
        let book_handle = self
            .books
            .get(symbol)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| EngineError::UnknownSymbol(symbol.to_string()))?;

        let (order, update) = {
            let mut book = book_handle.write().expect("order book lock poisoned");
            let order = book.cancel_order(order_id)?;
            (order, book.depth(self.config.default_depth))
        };

        info!(symbol, %order_id, "order cancelled");
        self.notify_book_update(&update);

        Ok(order)
    }

    /// Best bid and best ask for a symbol; `None` if no book exists yet.
    pub fn bbo(&self, symbol: &str) -> Option<(Option<Price>, Option<Price>)> {
        let book_handle = self.books.get(symbol)?.value().clone();
        let book = book_handle.read().expect("order book lock poisoned");
        Some(book.bbo())
    }

    /// Depth snapshot for a symbol. `levels` falls back to the configured
    /// default depth.
    pub fn depth(&self, symbol: &str, levels: Option<usize>) -> Option<DepthSnapshot> {
        let book_handle = self.books.get(symbol)?.value().clone();
        let book = book_handle.read().expect("order book lock poisoned");
        Some(book.depth(levels.unwrap_or(self.config.default_depth)))
    }

    /// Look up a resting order.
    pub fn get_order(&self, order_id: &OrderId, symbol: &str) -> Option<Order> {
        let book_handle = self.books.get(symbol)?.value().clone();
        let book = book_handle.read().expect("order book lock poisoned");
        book.get_order(order_id).cloned()
    }

    /// Statistical summary of one symbol's book.
    pub fn symbol_statistics(&self, symbol: &str) -> Option<BookStatistics> {
        let book_handle = self.books.get(symbol)?.value().clone();
        let book = book_handle.read().expect("order book lock poisoned");
        Some(book.statistics())
    }

    /// Symbols with active books.
    pub fn symbols(&self) -> Vec<String> {
        self.books.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Whether a book exists for the symbol.
    pub fn has_book(&self, symbol: &str) -> bool {
        self.books.contains_key(symbol)
    }

    /// Number of active books.
    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Snapshot of the engine's activity counters.
    pub fn statistics(&self) -> StatisticsSnapshot {
        self.statistics.snapshot()
    }

    /// Resolve or lazily create the book for a symbol, returning a clone of
    /// its handle so the registry guard is released before any locking.
    fn book_handle(&self, symbol: &str) -> Arc<RwLock<OrderBook>> {
        let entry = self.books.entry(symbol.to_string()).or_insert_with(|| {
            let book = match self.trade_id_seed {
                Some(seed) => OrderBook::with_trade_id_generator(
                    symbol,
                    TradeIdGenerator::for_symbol(seed, symbol),
                ),
                None => OrderBook::new(symbol),
            };
            Arc::new(RwLock::new(book))
        });
        Arc::clone(entry.value())
    }

    /// Validate a request and build the accepted order, assigning identity,
    /// sequence, and timestamp.
    fn build_order(&self, request: &OrderRequest) -> Result<Order, EngineError> {
        let symbol = request.symbol.trim();
        if symbol.is_empty() {
            return Err(ValidationError::EmptySymbol.into());
        }

        let order_type = OrderType::parse(&request.order_type)
            .ok_or_else(|| ValidationError::UnknownOrderType(request.order_type.clone()))?;
        let side = Side::parse(&request.side)
            .ok_or_else(|| ValidationError::UnknownSide(request.side.clone()))?;

        let quantity = Quantity::parse(&request.quantity, self.config.decimal_scale)
            .map_err(ValidationError::InvalidQuantity)?;
        if quantity.value() < self.config.min_quantity
            || quantity.value() > self.config.max_quantity
        {
            return Err(ValidationError::QuantityOutOfRange {
                value: quantity.value(),
                min: self.config.min_quantity,
                max: self.config.max_quantity,
            }
            .into());
        }

        let price = if order_type.requires_price() {
            let text = request
                .price
                .as_deref()
                .ok_or(ValidationError::MissingPrice { order_type })?;
            let price = Price::parse(text, self.config.decimal_scale)
                .map_err(ValidationError::InvalidPrice)?;
            if price.value() < self.config.min_price || price.value() > self.config.max_price {
                return Err(ValidationError::PriceOutOfRange {
                    value: price.value(),
                    min: self.config.min_price,
                    max: self.config.max_price,
                }
                .into());
            }
            Some(price)
        } else {
            // Market orders carry no price; any supplied value is ignored.
            None
        };

        let order_id = match request.order_id.as_deref() {
            Some(id) if !id.trim().is_empty() => {
                let order_id = OrderId::from(id);
                if self.is_live_order(&order_id) {
                    return Err(EngineError::DuplicateOrderId(order_id));
                }
                order_id
            }
            _ if self.config.assign_ids => OrderId::generate(),
            _ => return Err(ValidationError::MissingOrderId.into()),
        };

        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(Order::new(
            order_id,
            symbol,
            order_type,
            side,
            quantity,
            price,
            sequence,
            current_time_millis(),
        ))
    }

    /// Whether any book currently holds a resting order with this id.
    fn is_live_order(&self, order_id: &OrderId) -> bool {
        self.books.iter().any(|entry| {
            entry
                .value()
                .read()
                .expect("order book lock poisoned")
                .contains_order(order_id)
        })
    }

    /// Invoke trade listeners for each trade in emission order. A panicking
    /// listener is logged and isolated; it cannot affect the engine or the
    /// other subscribers.
    fn notify_trades(&self, trades: &[Trade]) {
        if trades.is_empty() {
            return;
        }

        let listeners = self
            .trade_listeners
            .read()
            .expect("trade listener registry poisoned");
        for trade in trades {
            for listener in listeners.iter() {
                if catch_unwind(AssertUnwindSafe(|| listener(trade))).is_err() {
                    warn!(symbol = %trade.symbol, trade_id = %trade.trade_id,
                          "trade listener panicked; subscriber isolated");
                }
            }
        }
    }

    /// Invoke book-update listeners with the snapshot taken under the book's
    /// guard.
    fn notify_book_update(&self, update: &DepthSnapshot) {
        let listeners = self
            .book_update_listeners
            .read()
            .expect("book update listener registry poisoned");
        for listener in listeners.iter() {
            if catch_unwind(AssertUnwindSafe(|| listener(update))).is_err() {
                warn!(symbol = %update.symbol, "book update listener panicked; subscriber isolated");
            }
        }
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn books_are_created_lazily_per_symbol() {
        let engine = MatchingEngine::default();
        assert_eq!(engine.book_count(), 0);

        engine
            .submit_order(OrderRequest::limit("BTC-USDT", Side::Buy, "1.0", "100"))
            .unwrap();
        engine
            .submit_order(OrderRequest::limit("ETH-USDT", Side::Buy, "1.0", "100"))
            .unwrap();

        assert_eq!(engine.book_count(), 2);
        assert!(engine.has_book("BTC-USDT"));
        let mut symbols = engine.symbols();
        symbols.sort();
        assert_eq!(symbols, vec!["BTC-USDT", "ETH-USDT"]);
    }

    #[test]
    fn sequences_are_engine_wide_not_per_symbol() {
        let engine = MatchingEngine::default();
        engine
            .submit_order(
                OrderRequest::limit("BTC-USDT", Side::Buy, "1.0", "100").with_order_id("btc-1"),
            )
            .unwrap();
        engine
            .submit_order(
                OrderRequest::limit("ETH-USDT", Side::Buy, "1.0", "100").with_order_id("eth-1"),
            )
            .unwrap();

        let btc = engine.get_order(&OrderId::from("btc-1"), "BTC-USDT").unwrap();
        let eth = engine.get_order(&OrderId::from("eth-1"), "ETH-USDT").unwrap();
        assert_eq!(btc.sequence, 1);
        assert_eq!(eth.sequence, 2);
    }

    #[test]
    fn deterministic_engines_replay_identical_trade_ids() {
        let run = || {
            let engine =
                MatchingEngine::with_deterministic_ids(EngineConfig::default(), 7);
            engine
                .submit_order(
                    OrderRequest::limit("BTC-USDT", Side::Sell, "1.0", "100").with_order_id("s"),
                )
                .unwrap();
            engine
                .submit_order(
                    OrderRequest::limit("BTC-USDT", Side::Buy, "1.0", "100").with_order_id("b"),
                )
                .unwrap()
                .trades
                .remove(0)
                .trade_id
        };

        assert_eq!(run(), run());
    }
}
