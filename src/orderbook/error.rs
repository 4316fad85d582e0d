//! Order book error types

use crate::types::OrderId;
use std::fmt;

/// Errors that can occur within the OrderBook
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OrderBookError {
    /// Order not found in the book (unknown id, or already terminal)
    OrderNotFound(OrderId),

    /// An order with this id is already resting in the book
    DuplicateOrderId(OrderId),

    /// Operation not permitted for the given order
    InvalidOperation {
        /// Description of the error
        message: String,
    },
}

impl fmt::Display for OrderBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBookError::OrderNotFound(id) => write!(f, "order not found: {id}"),
            OrderBookError::DuplicateOrderId(id) => {
                write!(f, "duplicate order id: {id} is already resting")
            }
            OrderBookError::InvalidOperation { message } => {
                write!(f, "invalid operation: {message}")
            }
        }
    }
}

impl std::error::Error for OrderBookError {}
