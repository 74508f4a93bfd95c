//! In-memory repository implementations for testing.
//!
//! These implementations store aggregates in memory and provide the same
//! interface as the PostgreSQL implementations. They are also the usual
//! targets for manual wiring overrides.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{OrderId, UserId};
use domain::{Cart, Order};
use tokio::sync::RwLock;

use crate::{CartRepository, OrderRepository, Result};

/// In-memory implementation of [`CartRepository`].
#[derive(Clone, Default)]
pub struct InMemoryCartRepository {
    carts: Arc<RwLock<HashMap<UserId, Cart>>>,
}

impl InMemoryCartRepository {
    /// Creates a new empty in-memory cart repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored carts.
    pub async fn cart_count(&self) -> usize {
        self.carts.read().await.len()
    }

    /// Clears all stored carts.
    pub async fn clear(&self) {
        self.carts.write().await.clear();
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn get_by_user_id(&self, user_id: &UserId) -> Result<Option<Cart>> {
        Ok(self.carts.read().await.get(user_id).cloned())
    }

    async fn save(&self, cart: &Cart) -> Result<()> {
        self.carts
            .write()
            .await
            .insert(cart.user_id().clone(), cart.clone());
        Ok(())
    }
}

/// In-memory implementation of [`OrderRepository`].
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderRepository {
    /// Creates a new empty in-memory order repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn get_by_id(&self, order_id: &OrderId) -> Result<Option<Order>> {
        Ok(self.orders.read().await.get(order_id).cloned())
    }

    async fn save(&self, order: &Order) -> Result<()> {
        self.orders.write().await.insert(order.id(), order.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Money, OrderItem, ProductId};

    #[tokio::test]
    async fn cart_missing_user_returns_none() {
        let repo = InMemoryCartRepository::new();
        let result = repo.get_by_user_id(&UserId::new("nobody")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn cart_save_then_load_roundtrip() {
        let repo = InMemoryCartRepository::new();

        let mut cart = Cart::new(UserId::new("user-1"));
        cart.add_item(ProductId::new("p1"), Money::from_cents(100), 2)
            .unwrap();
        cart.add_item(ProductId::new("p2"), Money::from_cents(50), 1)
            .unwrap();
        repo.save(&cart).await.unwrap();

        let loaded = repo
            .get_by_user_id(&UserId::new("user-1"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(loaded.item_count(), 2);
        assert_eq!(loaded.total_amount().cents(), 250);
        assert_eq!(loaded, cart);
    }

    #[tokio::test]
    async fn cart_save_replaces_previous_snapshot() {
        let repo = InMemoryCartRepository::new();

        let mut cart = Cart::new(UserId::new("user-1"));
        cart.add_item(ProductId::new("p1"), Money::from_cents(100), 2)
            .unwrap();
        repo.save(&cart).await.unwrap();

        let replacement = Cart::new(UserId::new("user-1"));
        repo.save(&replacement).await.unwrap();

        let loaded = repo
            .get_by_user_id(&UserId::new("user-1"))
            .await
            .unwrap()
            .unwrap();
        assert!(loaded.is_empty());
        assert_eq!(repo.cart_count().await, 1);
    }

    #[tokio::test]
    async fn order_save_then_load_roundtrip() {
        let repo = InMemoryOrderRepository::new();

        let mut order = Order::new(OrderId::new(), UserId::new("user-1"));
        order
            .add_item(OrderItem::new("line-1", "p1", 2, Money::from_cents(100)))
            .unwrap();
        repo.save(&order).await.unwrap();

        let loaded = repo.get_by_id(&order.id()).await.unwrap().unwrap();
        assert_eq!(loaded, order);
    }

    #[tokio::test]
    async fn order_missing_id_returns_none() {
        let repo = InMemoryOrderRepository::new();
        let result = repo.get_by_id(&OrderId::new()).await.unwrap();
        assert!(result.is_none());
    }
}
