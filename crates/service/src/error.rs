//! Service layer error types.

use common::OrderId;
use domain::{CartError, OrderError};
use store::StoreError;
use thiserror::Error;

/// Errors that can occur during service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// An error occurred in the cart aggregate.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// An error occurred in the order aggregate.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Order not found.
    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: OrderId },

    /// An error occurred in the persistence layer.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
