//! PostgreSQL-backed repository implementations.
//!
//! The `*RepositoryImpl` names are significant: the wiring layer pairs a
//! contract named `FooRepository` with the implementation named
//! `FooRepositoryImpl`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{OrderId, UserId};
use domain::{Cart, CartItem, Money, Order, OrderItem, OrderStatus, ProductId, ShippingAddress};
use sqlx::{Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    CartRepository, OrderRepository, Result, StoreError,
    session::DbSession,
};

/// PostgreSQL implementation of [`CartRepository`].
///
/// The cart is stored as one row per item; saving replaces every row for
/// the user inside a single transaction.
#[derive(Clone)]
pub struct CartRepositoryImpl {
    session: DbSession,
}

impl CartRepositoryImpl {
    /// Creates a new cart repository over the given session.
    pub fn new(session: DbSession) -> Self {
        Self { session }
    }

    fn row_to_item(row: &PgRow) -> Result<CartItem> {
        Ok(CartItem {
            product_id: ProductId::new(row.try_get::<String, _>("product_id")?),
            quantity: row.try_get::<i32, _>("quantity")? as u32,
            unit_price: Money::from_cents(row.try_get::<i64, _>("unit_price")?),
        })
    }
}

#[async_trait]
impl CartRepository for CartRepositoryImpl {
    async fn get_by_user_id(&self, user_id: &UserId) -> Result<Option<Cart>> {
        let rows = sqlx::query(
            r#"
            SELECT product_id, quantity, unit_price
            FROM cart_items
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(self.session.pool())
        .await?;

        if rows.is_empty() {
            return Ok(None);
        }

        let items = rows
            .iter()
            .map(Self::row_to_item)
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(Cart::with_items(user_id.clone(), items)))
    }

    async fn save(&self, cart: &Cart) -> Result<()> {
        let mut tx = self.session.begin().await?;

        sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(cart.user_id().as_str())
            .execute(&mut *tx)
            .await?;

        for item in cart.items() {
            sqlx::query(
                r#"
                INSERT INTO cart_items (user_id, product_id, quantity, unit_price)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(cart.user_id().as_str())
            .bind(item.product_id.as_str())
            .bind(item.quantity as i32)
            .bind(item.unit_price.cents())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::debug!(user_id = %cart.user_id(), items = cart.item_count(), "cart saved");
        Ok(())
    }
}

/// PostgreSQL implementation of [`OrderRepository`].
///
/// Orders are stored as a header row plus one row per item; saving upserts
/// the header and replaces the items inside a single transaction.
#[derive(Clone)]
pub struct OrderRepositoryImpl {
    session: DbSession,
}

impl OrderRepositoryImpl {
    /// Creates a new order repository over the given session.
    pub fn new(session: DbSession) -> Self {
        Self { session }
    }

    fn row_to_order(row: &PgRow, items: Vec<OrderItem>) -> Result<Order> {
        let status: OrderStatus = row
            .try_get::<String, _>("status")?
            .parse()
            .map_err(|e: domain::order::UnknownStatus| StoreError::Decode(e.to_string()))?;

        let shipping_address = match row.try_get::<Option<String>, _>("street")? {
            Some(street) => Some(ShippingAddress {
                street,
                city: row
                    .try_get::<Option<String>, _>("city")?
                    .ok_or_else(|| StoreError::Decode("address missing city".into()))?,
                postal_code: row
                    .try_get::<Option<String>, _>("postal_code")?
                    .ok_or_else(|| StoreError::Decode("address missing postal code".into()))?,
                country: row
                    .try_get::<Option<String>, _>("country")?
                    .ok_or_else(|| StoreError::Decode("address missing country".into()))?,
            }),
            None => None,
        };

        Ok(Order::from_parts(
            OrderId::from_uuid(row.try_get::<Uuid, _>("id")?),
            UserId::new(row.try_get::<String, _>("user_id")?),
            items,
            shipping_address,
            status,
            row.try_get::<DateTime<Utc>, _>("created_at")?,
        ))
    }

    fn row_to_item(row: &PgRow) -> Result<OrderItem> {
        Ok(OrderItem {
            item_id: row.try_get::<String, _>("item_id")?,
            product_id: ProductId::new(row.try_get::<String, _>("product_id")?),
            quantity: row.try_get::<i32, _>("quantity")? as u32,
            unit_price: Money::from_cents(row.try_get::<i64, _>("unit_price")?),
        })
    }
}

#[async_trait]
impl OrderRepository for OrderRepositoryImpl {
    async fn get_by_id(&self, order_id: &OrderId) -> Result<Option<Order>> {
        let header = sqlx::query(
            r#"
            SELECT id, user_id, status, street, city, postal_code, country, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(order_id.as_uuid())
        .fetch_optional(self.session.pool())
        .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        let item_rows = sqlx::query(
            r#"
            SELECT item_id, product_id, quantity, unit_price
            FROM order_items
            WHERE order_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(order_id.as_uuid())
        .fetch_all(self.session.pool())
        .await?;

        let items = item_rows
            .iter()
            .map(Self::row_to_item)
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(Self::row_to_order(&header, items)?))
    }

    async fn save(&self, order: &Order) -> Result<()> {
        let mut tx = self.session.begin().await?;

        let address = order.shipping_address();
        sqlx::query(
            r#"
            INSERT INTO orders (id, user_id, status, street, city, postal_code, country, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                status = EXCLUDED.status,
                street = EXCLUDED.street,
                city = EXCLUDED.city,
                postal_code = EXCLUDED.postal_code,
                country = EXCLUDED.country
            "#,
        )
        .bind(order.id().as_uuid())
        .bind(order.user_id().as_str())
        .bind(order.status().as_str())
        .bind(address.map(|a| a.street.as_str()))
        .bind(address.map(|a| a.city.as_str()))
        .bind(address.map(|a| a.postal_code.as_str()))
        .bind(address.map(|a| a.country.as_str()))
        .bind(order.created_at())
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(order.id().as_uuid())
            .execute(&mut *tx)
            .await?;

        for item in order.items() {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, item_id, product_id, quantity, unit_price)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(order.id().as_uuid())
            .bind(item.item_id.as_str())
            .bind(item.product_id.as_str())
            .bind(item.quantity as i32)
            .bind(item.unit_price.cents())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::debug!(order_id = %order.id(), status = %order.status(), "order saved");
        Ok(())
    }
}
