//! Order aggregate and related types.

mod aggregate;
mod state;
mod value_objects;

pub use aggregate::Order;
pub use state::{OrderStatus, UnknownStatus};
pub use value_objects::{OrderItem, ShippingAddress};

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Order is not in the expected status.
    #[error("Invalid state transition: cannot {action} from {current_status} status")]
    InvalidStateTransition {
        current_status: OrderStatus,
        action: &'static str,
    },

    /// An item with the same identifier already exists in the order.
    #[error("Duplicate item: {item_id}")]
    DuplicateItem { item_id: String },

    /// Invalid quantity.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// Negative unit price.
    #[error("Invalid unit price: {price} (must not be negative)")]
    NegativePrice { price: i64 },

    /// Order has no items.
    #[error("Order has no items")]
    NoItems,

    /// Order has no shipping address.
    #[error("Order has no shipping address")]
    MissingShippingAddress,
}
