//! Value objects and entities owned by the order aggregate.

use serde::{Deserialize, Serialize};

use crate::value_objects::{Money, ProductId};

/// An item in an order.
///
/// Unlike cart items, order items are entities: each carries its own
/// identifier and is mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Identifier of this line within the order.
    pub item_id: String,

    /// The product identifier.
    pub product_id: ProductId,

    /// Quantity ordered.
    pub quantity: u32,

    /// Price per unit in the smallest currency unit.
    pub unit_price: Money,
}

impl OrderItem {
    /// Creates a new order item.
    pub fn new(
        item_id: impl Into<String>,
        product_id: impl Into<ProductId>,
        quantity: u32,
        unit_price: Money,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            product_id: product_id.into(),
            quantity,
            unit_price,
        }
    }

    /// Returns the total price for this item (quantity * unit_price).
    pub fn total_price(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// Shipping address for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl ShippingAddress {
    /// Creates a new shipping address.
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        postal_code: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            postal_code: postal_code.into(),
            country: country.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_item_total_price() {
        let item = OrderItem::new("line-1", "SKU-001", 3, Money::from_cents(1000));
        assert_eq!(item.total_price().cents(), 3000);
    }

    #[test]
    fn test_order_item_serialization() {
        let item = OrderItem::new("line-1", "SKU-001", 2, Money::from_cents(999));
        let json = serde_json::to_string(&item).unwrap();
        let deserialized: OrderItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, deserialized);
    }

    #[test]
    fn test_shipping_address_serialization() {
        let addr = ShippingAddress::new("1 Main St", "Springfield", "12345", "US");
        let json = serde_json::to_string(&addr).unwrap();
        let deserialized: ShippingAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, deserialized);
    }
}
