//! Order service providing the application-level order operations.

use std::sync::Arc;

use common::{OrderId, UserId};
use domain::{Order, OrderItem, ShippingAddress};
use store::OrderRepository;

use crate::error::ServiceError;

/// Service for managing orders.
///
/// Each operation loads the aggregate, applies the transition, and saves
/// the resulting snapshot.
pub struct OrderService {
    order_repo: Arc<dyn OrderRepository>,
}

impl OrderService {
    /// Creates a new order service with the given repository.
    pub fn new(order_repo: Arc<dyn OrderRepository>) -> Self {
        Self { order_repo }
    }

    async fn load(&self, order_id: &OrderId) -> Result<Order, ServiceError> {
        self.order_repo
            .get_by_id(order_id)
            .await?
            .ok_or(ServiceError::OrderNotFound {
                order_id: *order_id,
            })
    }

    /// Creates a new pending order, optionally with a shipping address.
    #[tracing::instrument(skip(self))]
    pub async fn create_order(
        &self,
        user_id: UserId,
        shipping_address: Option<ShippingAddress>,
    ) -> Result<Order, ServiceError> {
        let mut order = Order::new(OrderId::new(), user_id);
        if let Some(address) = shipping_address {
            order.set_shipping_address(address);
        }
        self.order_repo.save(&order).await?;

        metrics::counter!("orders_created_total").increment(1);
        Ok(order)
    }

    /// Loads an order by ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, order_id: &OrderId) -> Result<Order, ServiceError> {
        self.load(order_id).await
    }

    /// Adds an item to a pending order.
    #[tracing::instrument(skip(self, item))]
    pub async fn add_item(
        &self,
        order_id: &OrderId,
        item: OrderItem,
    ) -> Result<Order, ServiceError> {
        let mut order = self.load(order_id).await?;
        order.add_item(item)?;
        self.order_repo.save(&order).await?;
        Ok(order)
    }

    /// Sets the shipping address on an order.
    #[tracing::instrument(skip(self, address))]
    pub async fn set_shipping_address(
        &self,
        order_id: &OrderId,
        address: ShippingAddress,
    ) -> Result<Order, ServiceError> {
        let mut order = self.load(order_id).await?;
        order.set_shipping_address(address);
        self.order_repo.save(&order).await?;
        Ok(order)
    }

    /// Confirms an order.
    #[tracing::instrument(skip(self))]
    pub async fn confirm(&self, order_id: &OrderId) -> Result<Order, ServiceError> {
        let mut order = self.load(order_id).await?;
        order.confirm()?;
        self.order_repo.save(&order).await?;

        metrics::counter!("orders_confirmed_total").increment(1);
        Ok(order)
    }

    /// Marks an order as shipped.
    #[tracing::instrument(skip(self))]
    pub async fn ship(&self, order_id: &OrderId) -> Result<Order, ServiceError> {
        let mut order = self.load(order_id).await?;
        order.ship()?;
        self.order_repo.save(&order).await?;
        Ok(order)
    }

    /// Marks an order as delivered.
    #[tracing::instrument(skip(self))]
    pub async fn deliver(&self, order_id: &OrderId) -> Result<Order, ServiceError> {
        let mut order = self.load(order_id).await?;
        order.deliver()?;
        self.order_repo.save(&order).await?;
        Ok(order)
    }

    /// Cancels an order.
    #[tracing::instrument(skip(self))]
    pub async fn cancel(&self, order_id: &OrderId) -> Result<Order, ServiceError> {
        let mut order = self.load(order_id).await?;
        order.cancel()?;
        self.order_repo.save(&order).await?;

        metrics::counter!("orders_cancelled_total").increment(1);
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Money, OrderError, OrderStatus};
    use store::InMemoryOrderRepository;

    fn service() -> OrderService {
        OrderService::new(Arc::new(InMemoryOrderRepository::new()))
    }

    fn address() -> ShippingAddress {
        ShippingAddress::new("1 Main St", "Springfield", "12345", "US")
    }

    #[tokio::test]
    async fn test_create_order() {
        let service = service();

        let order = service
            .create_order(UserId::new("user-1"), None)
            .await
            .unwrap();

        assert_eq!(order.status(), OrderStatus::Pending);
        let loaded = service.get_order(&order.id()).await.unwrap();
        assert_eq!(loaded, order);
    }

    #[tokio::test]
    async fn test_get_missing_order_fails() {
        let service = service();

        let result = service.get_order(&OrderId::new()).await;
        assert!(matches!(result, Err(ServiceError::OrderNotFound { .. })));
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let service = service();

        let order = service
            .create_order(UserId::new("user-1"), Some(address()))
            .await
            .unwrap();
        let id = order.id();

        service
            .add_item(&id, OrderItem::new("line-1", "SKU-001", 2, Money::from_cents(1000)))
            .await
            .unwrap();

        let order = service.confirm(&id).await.unwrap();
        assert_eq!(order.status(), OrderStatus::Confirmed);

        let order = service.ship(&id).await.unwrap();
        assert_eq!(order.status(), OrderStatus::Shipped);

        let order = service.deliver(&id).await.unwrap();
        assert_eq!(order.status(), OrderStatus::Delivered);
    }

    #[tokio::test]
    async fn test_confirm_without_address_fails() {
        let service = service();

        let order = service
            .create_order(UserId::new("user-1"), None)
            .await
            .unwrap();
        service
            .add_item(
                &order.id(),
                OrderItem::new("line-1", "SKU-001", 1, Money::from_cents(100)),
            )
            .await
            .unwrap();

        let result = service.confirm(&order.id()).await;
        assert!(matches!(
            result,
            Err(ServiceError::Order(OrderError::MissingShippingAddress))
        ));
    }

    #[tokio::test]
    async fn test_cancel_from_shipped() {
        let service = service();

        let order = service
            .create_order(UserId::new("user-1"), Some(address()))
            .await
            .unwrap();
        let id = order.id();
        service
            .add_item(&id, OrderItem::new("line-1", "SKU-001", 1, Money::from_cents(100)))
            .await
            .unwrap();
        service.confirm(&id).await.unwrap();
        service.ship(&id).await.unwrap();

        let order = service.cancel(&id).await.unwrap();
        assert_eq!(order.status(), OrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_cancel_from_delivered_fails() {
        let service = service();

        let order = service
            .create_order(UserId::new("user-1"), Some(address()))
            .await
            .unwrap();
        let id = order.id();
        service
            .add_item(&id, OrderItem::new("line-1", "SKU-001", 1, Money::from_cents(100)))
            .await
            .unwrap();
        service.confirm(&id).await.unwrap();
        service.ship(&id).await.unwrap();
        service.deliver(&id).await.unwrap();

        let result = service.cancel(&id).await;
        assert!(matches!(
            result,
            Err(ServiceError::Order(OrderError::InvalidStateTransition { .. }))
        ));
    }

    #[tokio::test]
    async fn test_failed_transition_is_not_persisted() {
        let service = service();

        let order = service
            .create_order(UserId::new("user-1"), None)
            .await
            .unwrap();
        let id = order.id();

        // Confirm fails (no items, no address); the stored order stays pending.
        let _ = service.confirm(&id).await.unwrap_err();
        let loaded = service.get_order(&id).await.unwrap();
        assert_eq!(loaded.status(), OrderStatus::Pending);
    }
}
