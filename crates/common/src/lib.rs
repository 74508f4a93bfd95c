//! Shared identifier types used across the commerce backend.

mod types;

pub use types::{OrderId, UserId};
