//! HTTP API server for the commerce backend.
//!
//! Exposes the cart and order services over REST with structured logging
//! (tracing) and Prometheus metrics. Each request builds one dependency
//! resolution graph, scoped to its own persistence session, through the
//! shared [`DependencyRegistry`].

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use service::{CartService, OrderService};
use sqlx::PgPool;
use store::DbSession;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use wiring::DependencyRegistry;

use error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState {
    registry: Arc<DependencyRegistry>,
    pool: PgPool,
}

impl AppState {
    /// Creates the application state.
    pub fn new(registry: Arc<DependencyRegistry>, pool: PgPool) -> Self {
        Self { registry, pool }
    }

    /// Returns the shared registry.
    pub fn registry(&self) -> &Arc<DependencyRegistry> {
        &self.registry
    }

    /// Opens a fresh persistence session for one request.
    pub fn session(&self) -> DbSession {
        DbSession::new(self.pool.clone())
    }

    /// Resolves a [`CartService`] over a fresh session.
    pub fn cart_service(&self) -> Result<Arc<CartService>, ApiError> {
        Ok(wiring::get_service::<CartService>(
            &self.registry,
            self.session(),
        )?)
    }

    /// Resolves an [`OrderService`] over a fresh session.
    pub fn order_service(&self) -> Result<Arc<OrderService>, ApiError> {
        Ok(wiring::get_service::<OrderService>(
            &self.registry,
            self.session(),
        )?)
    }
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/carts/{user_id}", get(routes::carts::get))
        .route("/carts/{user_id}/items", post(routes::carts::add_item))
        .route("/orders", post(routes::orders::create))
        .route("/orders/{id}", get(routes::orders::get))
        .route("/orders/{id}/items", post(routes::orders::add_item))
        .route("/orders/{id}/address", post(routes::orders::set_address))
        .route("/orders/{id}/confirm", post(routes::orders::confirm))
        .route("/orders/{id}/ship", post(routes::orders::ship))
        .route("/orders/{id}/deliver", post(routes::orders::deliver))
        .route("/orders/{id}/cancel", post(routes::orders::cancel))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
