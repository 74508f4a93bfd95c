//! Order endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::OrderId;
use domain::{Money, Order, OrderItem, ShippingAddress};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;

// -- Request types --

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub user_id: String,
    pub shipping_address: Option<AddressRequest>,
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
}

#[derive(Deserialize)]
pub struct AddressRequest {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl AddressRequest {
    fn into_domain(self) -> ShippingAddress {
        ShippingAddress::new(self.street, self.city, self.postal_code, self.country)
    }
}

#[derive(Deserialize)]
pub struct OrderItemRequest {
    pub item_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

impl OrderItemRequest {
    fn into_domain(self) -> Result<OrderItem, ApiError> {
        let quantity = u32::try_from(self.quantity)
            .map_err(|_| ApiError::BadRequest(format!("Invalid quantity: {}", self.quantity)))?;
        Ok(OrderItem::new(
            self.item_id,
            self.product_id,
            quantity,
            Money::from_cents(self.unit_price_cents),
        ))
    }
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub user_id: String,
    pub status: String,
    pub items: Vec<OrderItemResponse>,
    pub shipping_address: Option<AddressResponse>,
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct OrderItemResponse {
    pub item_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
}

#[derive(Serialize)]
pub struct AddressResponse {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl OrderResponse {
    fn from_domain(order: &Order) -> Self {
        Self {
            id: order.id().to_string(),
            user_id: order.user_id().to_string(),
            status: order.status().to_string(),
            items: order
                .items()
                .iter()
                .map(|item| OrderItemResponse {
                    item_id: item.item_id.clone(),
                    product_id: item.product_id.to_string(),
                    quantity: item.quantity,
                    unit_price_cents: item.unit_price.cents(),
                })
                .collect(),
            shipping_address: order.shipping_address().map(|a| AddressResponse {
                street: a.street.clone(),
                city: a.city.clone(),
                postal_code: a.postal_code.clone(),
                country: a.country.clone(),
            }),
            total_cents: order.total_amount().cents(),
            created_at: order.created_at(),
        }
    }
}

fn parse_order_id(id: &str) -> Result<OrderId, ApiError> {
    let uuid = uuid::Uuid::parse_str(id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid order id: {e}")))?;
    Ok(OrderId::from_uuid(uuid))
}

// -- Handlers --

/// POST /orders — creates a pending order, optionally with address and items.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let service = state.order_service()?;

    let address = req.shipping_address.map(AddressRequest::into_domain);
    let mut order = service
        .create_order(common::UserId::new(req.user_id), address)
        .await?;

    for item_req in req.items {
        let item = item_req.into_domain()?;
        order = service.add_item(&order.id(), item).await?;
    }

    Ok((StatusCode::CREATED, Json(OrderResponse::from_domain(&order))))
}

/// GET /orders/{id} — returns an order snapshot.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let service = state.order_service()?;
    let order = service.get_order(&order_id).await?;
    Ok(Json(OrderResponse::from_domain(&order)))
}

/// POST /orders/{id}/items — adds an item to a pending order.
#[tracing::instrument(skip(state, req))]
pub async fn add_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<OrderItemRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let item = req.into_domain()?;
    let service = state.order_service()?;
    let order = service.add_item(&order_id, item).await?;
    Ok(Json(OrderResponse::from_domain(&order)))
}

/// POST /orders/{id}/address — sets the shipping address.
#[tracing::instrument(skip(state, req))]
pub async fn set_address(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<AddressRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let service = state.order_service()?;
    let order = service
        .set_shipping_address(&order_id, req.into_domain())
        .await?;
    Ok(Json(OrderResponse::from_domain(&order)))
}

/// POST /orders/{id}/confirm — confirms a pending order.
#[tracing::instrument(skip(state))]
pub async fn confirm(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let service = state.order_service()?;
    let order = service.confirm(&order_id).await?;
    Ok(Json(OrderResponse::from_domain(&order)))
}

/// POST /orders/{id}/ship — marks a confirmed order as shipped.
#[tracing::instrument(skip(state))]
pub async fn ship(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let service = state.order_service()?;
    let order = service.ship(&order_id).await?;
    Ok(Json(OrderResponse::from_domain(&order)))
}

/// POST /orders/{id}/deliver — marks a shipped order as delivered.
#[tracing::instrument(skip(state))]
pub async fn deliver(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let service = state.order_service()?;
    let order = service.deliver(&order_id).await?;
    Ok(Json(OrderResponse::from_domain(&order)))
}

/// POST /orders/{id}/cancel — cancels a non-terminal order.
#[tracing::instrument(skip(state))]
pub async fn cancel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let service = state.order_service()?;
    let order = service.cancel(&order_id).await?;
    Ok(Json(OrderResponse::from_domain(&order)))
}
