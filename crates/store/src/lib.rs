//! Persistence layer for the commerce backend.
//!
//! This crate provides:
//! - the repository contracts (`CartRepository`, `OrderRepository`) that
//!   the service layer depends on, independent of storage technology
//! - the shared persistence session handle (`DbSession`)
//! - PostgreSQL implementations (`CartRepositoryImpl`, `OrderRepositoryImpl`)
//! - in-memory implementations for tests and manual wiring overrides

pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;
pub mod session;

pub use error::{Result, StoreError};
pub use memory::{InMemoryCartRepository, InMemoryOrderRepository};
pub use postgres::{CartRepositoryImpl, OrderRepositoryImpl};
pub use repository::{CartRepository, OrderRepository};
pub use session::DbSession;
