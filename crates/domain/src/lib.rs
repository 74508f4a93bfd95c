//! Domain layer for the commerce backend.
//!
//! This crate provides the core domain model:
//! - Cart aggregate with value-semantics items and merge-on-add
//! - Order aggregate with its status state machine
//! - Shared value objects (product IDs, money amounts)
//!
//! The domain performs no I/O; persistence goes through the repository
//! contracts defined in the `store` crate.

pub mod cart;
pub mod order;
pub mod value_objects;

pub use cart::{Cart, CartError, CartItem};
pub use order::{Order, OrderError, OrderItem, OrderStatus, ShippingAddress};
pub use value_objects::{Money, ProductId};
