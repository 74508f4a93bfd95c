//! Order aggregate implementation.

use chrono::{DateTime, Utc};
use common::{OrderId, UserId};
use serde::{Deserialize, Serialize};

use super::{OrderError, OrderItem, OrderStatus, ShippingAddress};
use crate::value_objects::Money;

/// Order aggregate root.
///
/// Represents an order with its full lifecycle from assembly through
/// confirmation, shipment and delivery, or cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    user_id: UserId,
    items: Vec<OrderItem>,
    shipping_address: Option<ShippingAddress>,
    status: OrderStatus,
    created_at: DateTime<Utc>,
}

// Query methods
impl Order {
    /// Creates a new pending order for a user.
    pub fn new(id: OrderId, user_id: UserId) -> Self {
        Self {
            id,
            user_id,
            items: Vec::new(),
            shipping_address: None,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Rehydrates a persisted order.
    pub fn from_parts(
        id: OrderId,
        user_id: UserId,
        items: Vec<OrderItem>,
        shipping_address: Option<ShippingAddress>,
        status: OrderStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            items,
            shipping_address,
            status,
            created_at,
        }
    }

    /// Returns the order ID.
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the owning user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the items in the order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns an item by its identifier.
    pub fn get_item(&self, item_id: &str) -> Option<&OrderItem> {
        self.items.iter().find(|item| item.item_id == item_id)
    }

    /// Returns the number of items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the order has items.
    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// Returns the shipping address, if set.
    pub fn shipping_address(&self) -> Option<&ShippingAddress> {
        self.shipping_address.as_ref()
    }

    /// Returns the current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns true if the order is in a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns the total amount of the order.
    pub fn total_amount(&self) -> Money {
        self.items.iter().map(OrderItem::total_price).sum()
    }
}

// Mutation methods
impl Order {
    /// Adds an item to the order.
    ///
    /// Items can only be added while the order is pending, and each item
    /// identifier may appear at most once.
    pub fn add_item(&mut self, item: OrderItem) -> Result<(), OrderError> {
        if item.quantity == 0 {
            return Err(OrderError::InvalidQuantity {
                quantity: item.quantity,
            });
        }

        if item.unit_price.is_negative() {
            return Err(OrderError::NegativePrice {
                price: item.unit_price.cents(),
            });
        }

        if !self.status.can_modify_items() {
            return Err(OrderError::InvalidStateTransition {
                current_status: self.status,
                action: "add item",
            });
        }

        if self.items.iter().any(|existing| existing.item_id == item.item_id) {
            return Err(OrderError::DuplicateItem {
                item_id: item.item_id,
            });
        }

        self.items.push(item);
        Ok(())
    }

    /// Sets the shipping address.
    pub fn set_shipping_address(&mut self, address: ShippingAddress) {
        self.shipping_address = Some(address);
    }

    /// Confirms the order.
    ///
    /// Requires a pending order with at least one item and a shipping
    /// address.
    pub fn confirm(&mut self) -> Result<(), OrderError> {
        if !self.status.can_confirm() {
            return Err(OrderError::InvalidStateTransition {
                current_status: self.status,
                action: "confirm",
            });
        }

        if !self.has_items() {
            return Err(OrderError::NoItems);
        }

        if self.shipping_address.is_none() {
            return Err(OrderError::MissingShippingAddress);
        }

        self.status = OrderStatus::Confirmed;
        Ok(())
    }

    /// Marks the order as shipped.
    pub fn ship(&mut self) -> Result<(), OrderError> {
        if !self.status.can_ship() {
            return Err(OrderError::InvalidStateTransition {
                current_status: self.status,
                action: "ship",
            });
        }

        self.status = OrderStatus::Shipped;
        Ok(())
    }

    /// Marks the order as delivered.
    pub fn deliver(&mut self) -> Result<(), OrderError> {
        if !self.status.can_deliver() {
            return Err(OrderError::InvalidStateTransition {
                current_status: self.status,
                action: "deliver",
            });
        }

        self.status = OrderStatus::Delivered;
        Ok(())
    }

    /// Cancels the order.
    ///
    /// Allowed from every non-terminal status, including Confirmed and
    /// Shipped.
    pub fn cancel(&mut self) -> Result<(), OrderError> {
        if !self.status.can_cancel() {
            return Err(OrderError::InvalidStateTransition {
                current_status: self.status,
                action: "cancel",
            });
        }

        self.status = OrderStatus::Cancelled;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        Order::new(OrderId::new(), UserId::new("user-1"))
    }

    fn item(item_id: &str) -> OrderItem {
        OrderItem::new(item_id, "SKU-001", 2, Money::from_cents(1000))
    }

    fn address() -> ShippingAddress {
        ShippingAddress::new("1 Main St", "Springfield", "12345", "US")
    }

    #[test]
    fn test_new_order_is_pending_and_empty() {
        let order = order();
        assert_eq!(order.status(), OrderStatus::Pending);
        assert!(!order.has_items());
        assert!(order.shipping_address().is_none());
        assert_eq!(order.total_amount(), Money::zero());
    }

    #[test]
    fn test_add_item() {
        let mut order = order();
        order.add_item(item("line-1")).unwrap();

        assert_eq!(order.item_count(), 1);
        assert_eq!(order.total_amount().cents(), 2000);
    }

    #[test]
    fn test_add_duplicate_item_id_fails() {
        let mut order = order();
        order.add_item(item("line-1")).unwrap();
        let result = order.add_item(item("line-1"));

        assert!(matches!(result, Err(OrderError::DuplicateItem { .. })));
        assert_eq!(order.item_count(), 1);
    }

    #[test]
    fn test_add_item_zero_quantity_fails() {
        let mut order = order();
        let result = order.add_item(OrderItem::new("line-1", "SKU-001", 0, Money::from_cents(100)));
        assert!(matches!(result, Err(OrderError::InvalidQuantity { .. })));
    }

    #[test]
    fn test_add_item_after_confirm_fails() {
        let mut order = order();
        order.add_item(item("line-1")).unwrap();
        order.set_shipping_address(address());
        order.confirm().unwrap();

        let result = order.add_item(item("line-2"));
        assert!(matches!(
            result,
            Err(OrderError::InvalidStateTransition { .. })
        ));
    }

    #[test]
    fn test_confirm_requires_items_even_with_address() {
        let mut order = order();
        order.set_shipping_address(address());

        let result = order.confirm();
        assert!(matches!(result, Err(OrderError::NoItems)));
        assert_eq!(order.status(), OrderStatus::Pending);
    }

    #[test]
    fn test_confirm_requires_address_even_with_items() {
        let mut order = order();
        order.add_item(item("line-1")).unwrap();

        let result = order.confirm();
        assert!(matches!(result, Err(OrderError::MissingShippingAddress)));
        assert_eq!(order.status(), OrderStatus::Pending);
    }

    #[test]
    fn test_confirm_succeeds_with_items_and_address() {
        let mut order = order();
        order.add_item(item("line-1")).unwrap();
        order.set_shipping_address(address());

        order.confirm().unwrap();
        assert_eq!(order.status(), OrderStatus::Confirmed);
    }

    #[test]
    fn test_confirm_twice_fails() {
        let mut order = order();
        order.add_item(item("line-1")).unwrap();
        order.set_shipping_address(address());
        order.confirm().unwrap();

        let result = order.confirm();
        assert!(matches!(
            result,
            Err(OrderError::InvalidStateTransition { .. })
        ));
    }

    #[test]
    fn test_full_lifecycle() {
        let mut order = order();
        order.add_item(item("line-1")).unwrap();
        order.set_shipping_address(address());

        order.confirm().unwrap();
        assert_eq!(order.status(), OrderStatus::Confirmed);

        order.ship().unwrap();
        assert_eq!(order.status(), OrderStatus::Shipped);

        order.deliver().unwrap();
        assert_eq!(order.status(), OrderStatus::Delivered);
        assert!(order.is_terminal());
    }

    #[test]
    fn test_ship_requires_confirmed() {
        let mut order = order();
        let result = order.ship();
        assert!(matches!(
            result,
            Err(OrderError::InvalidStateTransition { .. })
        ));
    }

    #[test]
    fn test_cancel_from_pending() {
        let mut order = order();
        order.cancel().unwrap();
        assert_eq!(order.status(), OrderStatus::Cancelled);
    }

    #[test]
    fn test_cancel_from_confirmed() {
        let mut order = order();
        order.add_item(item("line-1")).unwrap();
        order.set_shipping_address(address());
        order.confirm().unwrap();

        order.cancel().unwrap();
        assert_eq!(order.status(), OrderStatus::Cancelled);
    }

    #[test]
    fn test_cancel_from_shipped() {
        let mut order = order();
        order.add_item(item("line-1")).unwrap();
        order.set_shipping_address(address());
        order.confirm().unwrap();
        order.ship().unwrap();

        order.cancel().unwrap();
        assert_eq!(order.status(), OrderStatus::Cancelled);
    }

    #[test]
    fn test_cancel_from_delivered_fails() {
        let mut order = order();
        order.add_item(item("line-1")).unwrap();
        order.set_shipping_address(address());
        order.confirm().unwrap();
        order.ship().unwrap();
        order.deliver().unwrap();

        let result = order.cancel();
        assert!(matches!(
            result,
            Err(OrderError::InvalidStateTransition { .. })
        ));
        assert_eq!(order.status(), OrderStatus::Delivered);
    }

    #[test]
    fn test_cancel_from_cancelled_fails() {
        let mut order = order();
        order.cancel().unwrap();

        let result = order.cancel();
        assert!(matches!(
            result,
            Err(OrderError::InvalidStateTransition { .. })
        ));
    }

    #[test]
    fn test_total_amount_over_items() {
        let mut order = order();
        order
            .add_item(OrderItem::new("line-1", "SKU-001", 2, Money::from_cents(1000)))
            .unwrap();
        order
            .add_item(OrderItem::new("line-2", "SKU-002", 3, Money::from_cents(500)))
            .unwrap();

        assert_eq!(order.total_amount().cents(), 3500);
    }

    #[test]
    fn test_from_parts_rehydrates() {
        let id = OrderId::new();
        let created_at = Utc::now();
        let order = Order::from_parts(
            id,
            UserId::new("user-1"),
            vec![item("line-1")],
            Some(address()),
            OrderStatus::Shipped,
            created_at,
        );

        assert_eq!(order.id(), id);
        assert_eq!(order.status(), OrderStatus::Shipped);
        assert_eq!(order.item_count(), 1);
        assert_eq!(order.created_at(), created_at);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut order = order();
        order.add_item(item("line-1")).unwrap();
        order.set_shipping_address(address());

        let json = serde_json::to_string(&order).unwrap();
        let deserialized: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, deserialized);
    }
}
