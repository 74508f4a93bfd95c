//! Cart endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use common::UserId;
use domain::{Cart, Money, ProductId};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;

// -- Request types --

#[derive(Deserialize)]
pub struct AddItemRequest {
    pub product_id: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
}

// -- Response types --

#[derive(Serialize)]
pub struct CartResponse {
    pub user_id: String,
    pub items: Vec<CartItemResponse>,
    pub total_cents: i64,
}

#[derive(Serialize)]
pub struct CartItemResponse {
    pub product_id: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
}

impl CartResponse {
    fn from_domain(cart: &Cart) -> Self {
        Self {
            user_id: cart.user_id().to_string(),
            items: cart
                .items()
                .iter()
                .map(|item| CartItemResponse {
                    product_id: item.product_id.to_string(),
                    quantity: item.quantity,
                    unit_price_cents: item.unit_price.cents(),
                })
                .collect(),
            total_cents: cart.total_amount().cents(),
        }
    }
}

// -- Handlers --

/// GET /carts/{user_id} — returns the user's cart snapshot.
///
/// An absent cart reads as an empty one.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<CartResponse>, ApiError> {
    let service = state.cart_service()?;
    let cart = service.get_cart(&UserId::new(user_id)).await?;
    Ok(Json(CartResponse::from_domain(&cart)))
}

/// POST /carts/{user_id}/items — adds a product and returns the updated cart.
#[tracing::instrument(skip(state, req))]
pub async fn add_item(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<AddItemRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let quantity = u32::try_from(req.quantity)
        .map_err(|_| ApiError::BadRequest(format!("Invalid quantity: {}", req.quantity)))?;

    let service = state.cart_service()?;
    let cart = service
        .add_item(
            &UserId::new(user_id),
            ProductId::new(req.product_id),
            Money::from_cents(req.unit_price_cents),
            quantity,
        )
        .await?;

    Ok(Json(CartResponse::from_domain(&cart)))
}
