//! Prelude module that re-exports commonly used types and traits.
//!
//! Instead of importing each type individually, you can use:
//!
//! ```rust
//! use matchbook_rs::prelude::*;
//! ```

// Engine types
pub use crate::engine::{
    EngineConfig, EngineError, MatchingEngine, OrderRequest, StatisticsSnapshot,
    StdTradeDispatcher, SubmissionResult, TokioTradeDispatcher, ValidationError,
};

// Order book types
pub use crate::orderbook::{
    BookStatistics, BookUpdateListener, DepthSnapshot, OrderBook, OrderBookError, PriceLevel,
    Trade, TradeEvent, TradeListener,
};

// Core value types
pub use crate::types::{
    DecimalError, Order, OrderId, OrderStatus, OrderType, Price, Quantity, Side, TradeId,
    TradeIdGenerator,
};

// Utility functions
pub use crate::utils::current_time_millis;
