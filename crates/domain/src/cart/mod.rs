//! Cart aggregate and related types.

mod aggregate;

pub use aggregate::{Cart, CartItem};

use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Invalid quantity.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// Negative unit price.
    #[error("Invalid unit price: {price} (must not be negative)")]
    NegativePrice { price: i64 },
}
