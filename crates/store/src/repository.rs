//! Repository contracts for the cart and order aggregates.
//!
//! These traits are the only persistence surface the service layer sees.
//! Implementations are polymorphic over storage technology; the wiring
//! layer pairs each contract with a concrete implementation at startup.

use async_trait::async_trait;
use common::{OrderId, UserId};
use domain::{Cart, Order};

use crate::Result;

/// Contract for loading and saving cart aggregates.
///
/// `save` is a full-state upsert: the stored snapshot is replaced with the
/// given cart, no partial diffing. All implementations must be thread-safe
/// (Send + Sync).
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Loads the cart owned by a user.
    ///
    /// Returns `None` if the user has no persisted cart.
    async fn get_by_user_id(&self, user_id: &UserId) -> Result<Option<Cart>>;

    /// Persists the cart as a replace-all snapshot.
    async fn save(&self, cart: &Cart) -> Result<()>;
}

/// Contract for loading and saving order aggregates.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Loads an order by its identifier.
    ///
    /// Returns `None` if the order does not exist.
    async fn get_by_id(&self, order_id: &OrderId) -> Result<Option<Order>>;

    /// Persists the order as a full-state upsert.
    async fn save(&self, order: &Order) -> Result<()>;
}
