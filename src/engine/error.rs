//! Engine-level error types and rejection reason codes.

use crate::orderbook::OrderBookError;
use crate::types::{DecimalError, OrderId, OrderType};
use rust_decimal::Decimal;
use std::fmt;

/// Reasons an order submission fails validation before touching any book.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    /// The symbol field is empty
    EmptySymbol,

    /// The order type string is not one of market/limit/ioc/fok
    UnknownOrderType(String),

    /// The side string is not buy/sell
    UnknownSide(String),

    /// The quantity is malformed, non-positive, or over-scaled
    InvalidQuantity(DecimalError),

    /// The quantity is outside the configured bounds
    QuantityOutOfRange {
        /// The rejected quantity
        value: Decimal,
        /// Configured minimum
        min: Decimal,
        /// Configured maximum
        max: Decimal,
    },

    /// The price is malformed, non-positive, or over-scaled
    InvalidPrice(DecimalError),

    /// The price is outside the configured bounds
    PriceOutOfRange {
        /// The rejected price
        value: Decimal,
        /// Configured minimum
        min: Decimal,
        /// Configured maximum
        max: Decimal,
    },

    /// A priced order type arrived without a price
    MissingPrice {
        /// The order type that requires a price
        order_type: OrderType,
    },

    /// No order id was supplied and the engine is not minting ids
    MissingOrderId,
}

impl ValidationError {
    /// Stable machine-readable reason code for the transport layer.
    pub fn reason_code(&self) -> &'static str {
        match self {
            ValidationError::EmptySymbol => "empty_symbol",
            ValidationError::UnknownOrderType(_) => "unknown_order_type",
            ValidationError::UnknownSide(_) => "unknown_side",
            ValidationError::InvalidQuantity(_) => "invalid_quantity",
            ValidationError::QuantityOutOfRange { .. } => "quantity_out_of_range",
            ValidationError::InvalidPrice(_) => "invalid_price",
            ValidationError::PriceOutOfRange { .. } => "price_out_of_range",
            ValidationError::MissingPrice { .. } => "missing_price",
            ValidationError::MissingOrderId => "missing_order_id",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptySymbol => write!(f, "symbol cannot be empty"),
            ValidationError::UnknownOrderType(text) => {
                write!(f, "unknown order type: {text:?} (expected market, limit, ioc, or fok)")
            }
            ValidationError::UnknownSide(text) => {
                write!(f, "unknown side: {text:?} (expected buy or sell)")
            }
            ValidationError::InvalidQuantity(err) => write!(f, "invalid quantity: {err}"),
            ValidationError::QuantityOutOfRange { value, min, max } => {
                write!(f, "quantity {value} outside allowed range [{min}, {max}]")
            }
            ValidationError::InvalidPrice(err) => write!(f, "invalid price: {err}"),
            ValidationError::PriceOutOfRange { value, min, max } => {
                write!(f, "price {value} outside allowed range [{min}, {max}]")
            }
            ValidationError::MissingPrice { order_type } => {
                write!(f, "price is required for {order_type} orders")
            }
            ValidationError::MissingOrderId => {
                write!(f, "order id is required when the engine does not assign ids")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors the engine surfaces to submitters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    /// The submission failed validation; no book state was touched
    Validation(ValidationError),

    /// The caller-supplied order id conflicts with a live order
    DuplicateOrderId(OrderId),

    /// No order book exists for the symbol
    UnknownSymbol(String),

    /// An error bubbled up from the order book
    Book(OrderBookError),
}

impl EngineError {
    /// Stable machine-readable reason code for the transport layer.
    pub fn reason_code(&self) -> &'static str {
        match self {
            EngineError::Validation(err) => err.reason_code(),
            EngineError::DuplicateOrderId(_) => "duplicate_order_id",
            EngineError::UnknownSymbol(_) => "unknown_symbol",
            EngineError::Book(OrderBookError::OrderNotFound(_)) => "order_not_found",
            EngineError::Book(OrderBookError::DuplicateOrderId(_)) => "duplicate_order_id",
            EngineError::Book(_) => "invalid_operation",
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Validation(err) => write!(f, "validation failed: {err}"),
            EngineError::DuplicateOrderId(id) => {
                write!(f, "order id {id} conflicts with a live order")
            }
            EngineError::UnknownSymbol(symbol) => {
                write!(f, "no order book for symbol {symbol}")
            }
            EngineError::Book(err) => write!(f, "order book error: {err}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Validation(err) => Some(err),
            EngineError::Book(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for EngineError {
    fn from(err: ValidationError) -> Self {
        EngineError::Validation(err)
    }
}

impl From<OrderBookError> for EngineError {
    fn from(err: OrderBookError) -> Self {
        EngineError::Book(err)
    }
}
