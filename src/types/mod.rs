//! Core value types: exact decimal scalars, identifiers, and the order entity.

pub mod decimal;
pub mod id;
pub mod order;

pub use decimal::{notional, DecimalError, Price, Quantity, MIN_DECIMAL_SCALE};
pub use id::{OrderId, TradeId, TradeIdGenerator};
pub use order::{Order, OrderStatus, OrderType, Side};
