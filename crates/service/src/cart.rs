//! Cart service providing the application-level cart operations.

use std::sync::Arc;

use common::UserId;
use domain::{Cart, Money, ProductId};
use store::CartRepository;

use crate::error::ServiceError;

/// Service for managing carts.
///
/// A cart is created implicitly on first access: loading an absent cart
/// yields an empty one for the user, and the first mutation persists it.
pub struct CartService {
    cart_repo: Arc<dyn CartRepository>,
}

impl CartService {
    /// Creates a new cart service with the given repository.
    pub fn new(cart_repo: Arc<dyn CartRepository>) -> Self {
        Self { cart_repo }
    }

    /// Returns the user's cart, or an empty cart if none is persisted.
    #[tracing::instrument(skip(self))]
    pub async fn get_cart(&self, user_id: &UserId) -> Result<Cart, ServiceError> {
        let cart = self
            .cart_repo
            .get_by_user_id(user_id)
            .await?
            .unwrap_or_else(|| Cart::new(user_id.clone()));
        Ok(cart)
    }

    /// Adds a product to the user's cart and persists the new snapshot.
    ///
    /// Returns the updated cart.
    #[tracing::instrument(skip(self))]
    pub async fn add_item(
        &self,
        user_id: &UserId,
        product_id: ProductId,
        unit_price: Money,
        quantity: u32,
    ) -> Result<Cart, ServiceError> {
        let mut cart = self
            .cart_repo
            .get_by_user_id(user_id)
            .await?
            .unwrap_or_else(|| Cart::new(user_id.clone()));

        cart.add_item(product_id, unit_price, quantity)?;
        self.cart_repo.save(&cart).await?;

        metrics::counter!("cart_items_added_total").increment(1);
        Ok(cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::InMemoryCartRepository;

    fn service() -> (CartService, Arc<InMemoryCartRepository>) {
        let repo = Arc::new(InMemoryCartRepository::new());
        (CartService::new(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_get_cart_for_new_user_is_empty() {
        let (service, _) = service();

        let cart = service.get_cart(&UserId::new("user-1")).await.unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.user_id().as_str(), "user-1");
    }

    #[tokio::test]
    async fn test_add_item_persists_snapshot() {
        let (service, repo) = service();

        let cart = service
            .add_item(
                &UserId::new("user-1"),
                ProductId::new("SKU-001"),
                Money::from_cents(1000),
                2,
            )
            .await
            .unwrap();

        assert_eq!(cart.total_amount().cents(), 2000);
        assert_eq!(repo.cart_count().await, 1);

        let reloaded = service.get_cart(&UserId::new("user-1")).await.unwrap();
        assert_eq!(reloaded, cart);
    }

    #[tokio::test]
    async fn test_add_item_merges_across_calls() {
        let (service, _) = service();
        let user = UserId::new("user-1");

        service
            .add_item(&user, ProductId::new("SKU-001"), Money::from_cents(1000), 2)
            .await
            .unwrap();
        let cart = service
            .add_item(&user, ProductId::new("SKU-001"), Money::from_cents(1000), 3)
            .await
            .unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(
            cart.get_item(&ProductId::new("SKU-001")).unwrap().quantity,
            5
        );
    }

    #[tokio::test]
    async fn test_add_item_zero_quantity_fails_and_persists_nothing() {
        let (service, repo) = service();

        let result = service
            .add_item(
                &UserId::new("user-1"),
                ProductId::new("SKU-001"),
                Money::from_cents(1000),
                0,
            )
            .await;

        assert!(matches!(
            result,
            Err(ServiceError::Cart(domain::CartError::InvalidQuantity { .. }))
        ));
        assert_eq!(repo.cart_count().await, 0);
    }
}
