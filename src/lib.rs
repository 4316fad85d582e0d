//! # Price-Time Priority Matching Engine
//!
//! A limit-order matching engine for cryptocurrency venues, built around a
//! per-symbol order book with strict price-time priority and exact decimal
//! arithmetic on every monetary path.
//!
//! ## Key Features
//!
//! - **Four order types**: market, limit, immediate-or-cancel, and
//!   fill-or-kill, each with its own execution protocol. FOK runs a
//!   non-mutating fillability probe before consuming anything, so an
//!   unfillable order leaves the book untouched.
//!
//! - **Strict price-time priority**: the best opposite price level is always
//!   exhausted before a worse one is touched, and within a level resting
//!   orders fill strictly in arrival order. Trades always execute at the
//!   maker's resting price; trade-throughs cannot occur.
//!
//! - **Exact decimal arithmetic**: prices and quantities are
//!   [`rust_decimal`] values behind thin [`Price`] and [`Quantity`] wrappers.
//!   No binary floating point touches a monetary computation, and
//!   comparisons are insensitive to trailing zeros.
//!
//! - **Deterministic event stream**: trades carry engine-wide acceptance
//!   sequences for both sides, trade callbacks fire in emission order, and
//!   book-update snapshots are constructed inside the book's critical
//!   section, so subscribers can replay a stable history.
//!
//! - **Per-symbol isolation**: each order book sits behind its own guard and
//!   symbols match independently; the symbol registry is never locked across
//!   a matching pass.
//!
//! ## Architecture
//!
//! The crate splits into three layers, leaves first:
//!
//! 1. [`types`]: decimal scalars, identifiers, and the order entity.
//! 2. [`orderbook`]: the per-symbol book with FIFO price levels keyed by an
//!    ordered map per side, the match loop, cancel, and depth queries.
//! 3. [`engine`]: the multi-symbol coordinator handling validation,
//!    id/sequence assignment, routing, statistics, and listener dispatch,
//!    plus optional channel-based fan-out for moving trade events off the
//!    matching thread.
//!
//! The HTTP surface, streaming transports, and persistence are external
//! collaborators: they hand the engine wire strings and consume its events
//! through registered listeners.
//!
//! ## Example
//!
//! ```
//! use matchbook_rs::{EngineConfig, MatchingEngine, OrderRequest, Side};
//!
//! let engine = MatchingEngine::new(EngineConfig::default());
//!
//! engine
//!     .submit_order(OrderRequest::limit("BTC-USDT", Side::Sell, "1.0", "50010"))
//!     .unwrap();
//! let result = engine
//!     .submit_order(OrderRequest::limit("BTC-USDT", Side::Buy, "0.4", "50010"))
//!     .unwrap();
//!
//! assert_eq!(result.trades.len(), 1);
//! assert_eq!(result.trades[0].price.to_string(), "50010");
//!
//! let (best_bid, best_ask) = engine.bbo("BTC-USDT").unwrap();
//! assert!(best_bid.is_none());
//! assert_eq!(best_ask.unwrap().to_string(), "50010");
//! ```

pub mod engine;
pub mod orderbook;
pub mod prelude;
pub mod types;
mod utils;

pub use engine::{
    ConfigError, EngineConfig, EngineError, MatchingEngine, OrderRequest, StatisticsSnapshot,
    StdTradeDispatcher, SubmissionResult, SymbolStatisticsSnapshot, TokioTradeDispatcher,
    ValidationError,
};
pub use orderbook::{
    BookStatistics, BookUpdateListener, DepthSnapshot, OrderBook, OrderBookError, PriceLevel,
    Trade, TradeEvent, TradeListener,
};
pub use types::{
    notional, DecimalError, Order, OrderId, OrderStatus, OrderType, Price, Quantity, Side,
    TradeId, TradeIdGenerator, MIN_DECIMAL_SCALE,
};
pub use utils::current_time_millis;
