//! Cart aggregate implementation.

use common::UserId;
use serde::{Deserialize, Serialize};

use crate::value_objects::{Money, ProductId};

use super::CartError;

/// An item in a cart.
///
/// Cart items are immutable values: changing a quantity produces a
/// replacement item, never an in-place mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product identifier.
    pub product_id: ProductId,

    /// Quantity in the cart.
    pub quantity: u32,

    /// Price per unit in the smallest currency unit.
    pub unit_price: Money,
}

impl CartItem {
    /// Creates a new cart item.
    pub fn new(product_id: impl Into<ProductId>, quantity: u32, unit_price: Money) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            unit_price,
        }
    }

    /// Returns a replacement item with the quantity increased by `amount`.
    pub fn with_added_quantity(&self, amount: u32) -> Self {
        Self {
            product_id: self.product_id.clone(),
            quantity: self.quantity + amount,
            unit_price: self.unit_price,
        }
    }

    /// Returns the total price for this item (quantity * unit_price).
    pub fn total_price(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// Cart aggregate root.
///
/// A cart is keyed by the owning user and holds at most one item per
/// product ID: adding a product that is already present merges quantities
/// instead of appending a duplicate line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    user_id: UserId,
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates an empty cart for a user.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            items: Vec::new(),
        }
    }

    /// Rehydrates a cart from persisted items.
    pub fn with_items(user_id: UserId, items: Vec<CartItem>) -> Self {
        Self { user_id, items }
    }

    /// Returns the owning user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the items in the cart.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns an item by product ID.
    pub fn get_item(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.product_id == product_id)
    }

    /// Returns the number of distinct products.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds a product to the cart.
    ///
    /// If the product is already present, the quantities are merged and
    /// the existing entry's unit price is retained; the `unit_price`
    /// passed here only applies when the product enters the cart for the
    /// first time.
    ///
    /// The item collection is rebuilt on every mutation; prior item values
    /// are never aliased.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        unit_price: Money,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity { quantity });
        }

        if unit_price.is_negative() {
            return Err(CartError::NegativePrice {
                price: unit_price.cents(),
            });
        }

        let mut updated = Vec::with_capacity(self.items.len() + 1);
        let mut found = false;
        for item in &self.items {
            if item.product_id == product_id {
                updated.push(item.with_added_quantity(quantity));
                found = true;
            } else {
                updated.push(item.clone());
            }
        }

        if !found {
            updated.push(CartItem::new(product_id, quantity, unit_price));
        }

        self.items = updated;
        Ok(())
    }

    /// Returns the total amount of the cart.
    pub fn total_amount(&self) -> Money {
        self.items.iter().map(CartItem::total_price).sum()
    }
}
