//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::OrderError;
use service::ServiceError;
use wiring::WiringError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client.
    BadRequest(String),
    /// Service layer error.
    Service(ServiceError),
    /// Dependency wiring error.
    Wiring(WiringError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Service(err) => service_error_to_response(err),
            ApiError::Wiring(err) => wiring_error_to_response(err),
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn service_error_to_response(err: ServiceError) -> (StatusCode, String) {
    match &err {
        ServiceError::Cart(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        ServiceError::Order(order_err) => match order_err {
            OrderError::InvalidStateTransition { .. } => (StatusCode::CONFLICT, err.to_string()),
            OrderError::DuplicateItem { .. }
            | OrderError::InvalidQuantity { .. }
            | OrderError::NegativePrice { .. }
            | OrderError::NoItems
            | OrderError::MissingShippingAddress => (StatusCode::BAD_REQUEST, err.to_string()),
        },
        ServiceError::OrderNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        ServiceError::Store(store_err) => {
            // Detail stays in the logs; the client sees a generic message.
            tracing::error!(error = %store_err, "store failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            )
        }
    }
}

fn wiring_error_to_response(err: WiringError) -> (StatusCode, String) {
    // Any wiring failure surfacing here is a deployment defect, not a
    // client mistake. Make it loud in the logs and opaque to the caller.
    tracing::error!(error = %err, "dependency wiring failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal server error".to_string(),
    )
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}

impl From<WiringError> for ApiError {
    fn from(err: WiringError) -> Self {
        ApiError::Wiring(err)
    }
}
