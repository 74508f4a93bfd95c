//! Application services for the commerce backend.
//!
//! Services orchestrate the domain aggregates through the repository
//! contracts. They own no storage technology: concrete repositories are
//! injected by the wiring layer at request time.

pub mod cart;
pub mod error;
pub mod order;

pub use cart::CartService;
pub use error::ServiceError;
pub use order::OrderService;
