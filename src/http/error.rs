use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::session_actor::SessionError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Error type returned by every handler.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("Invalid request body: {}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),
    #[error("Not authorized: {0}")]
    Forbidden(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Stable code for programmatic handling, e.g. `invalid_state`.
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Order(e) => match e {
                OrderError::Authorization(_) | OrderError::Unauthorized(_) => StatusCode::FORBIDDEN,
                OrderError::NotFound(_) => StatusCode::NOT_FOUND,
                OrderError::InvalidState { .. } | OrderError::InsufficientStock { .. } => {
                    StatusCode::CONFLICT
                }
                OrderError::InvalidItem(_) => StatusCode::UNPROCESSABLE_ENTITY,
                OrderError::EmptyCart
                | OrderError::InvalidQuantity(_)
                | OrderError::ValidationError(_) => StatusCode::BAD_REQUEST,
                OrderError::ActorCommunicationError(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
            ApiError::Product(e) => match e {
                ProductError::NotFound(_) => StatusCode::NOT_FOUND,
                ProductError::AlreadyExists(_) | ProductError::InsufficientStock { .. } => {
                    StatusCode::CONFLICT
                }
                ProductError::InvalidQuantity(_)
                | ProductError::InvalidPrice(_)
                | ProductError::StockOverflow(_) => StatusCode::BAD_REQUEST,
                ProductError::ActorCommunicationError(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
            ApiError::Session(e) => match e {
                SessionError::MissingCredential | SessionError::InvalidCredential => {
                    StatusCode::UNAUTHORIZED
                }
                SessionError::AlreadyIssued => StatusCode::CONFLICT,
                SessionError::ValidationError(_) => StatusCode::BAD_REQUEST,
                SessionError::ActorCommunicationError(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
            ApiError::InvalidBody(rejection) => rejection.status(),
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Order(e) => match e {
                OrderError::Authorization(_) => "authorization",
                OrderError::NotFound(_) => "not_found",
                OrderError::InvalidState { .. } => "invalid_state",
                OrderError::InsufficientStock { .. } => "insufficient_stock",
                OrderError::InvalidItem(_) => "invalid_item",
                OrderError::EmptyCart => "empty_cart",
                OrderError::InvalidQuantity(_) => "invalid_quantity",
                OrderError::Unauthorized(_) => "unauthorized",
                OrderError::ValidationError(_) => "validation",
                OrderError::ActorCommunicationError(_) => "unavailable",
            },
            ApiError::Product(e) => match e {
                ProductError::NotFound(_) => "not_found",
                ProductError::AlreadyExists(_) => "already_exists",
                ProductError::InsufficientStock { .. } => "insufficient_stock",
                ProductError::InvalidQuantity(_) => "invalid_quantity",
                ProductError::InvalidPrice(_) => "invalid_price",
                ProductError::StockOverflow(_) => "validation",
                ProductError::ActorCommunicationError(_) => "unavailable",
            },
            ApiError::Session(e) => match e {
                SessionError::MissingCredential | SessionError::InvalidCredential => "unauthenticated",
                SessionError::ActorCommunicationError(_) => "unavailable",
                _ => "validation",
            },
            ApiError::InvalidBody(_) => "invalid_body",
            ApiError::Forbidden(_) => "authorization",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        let body = Json(ErrorResponse {
            code: self.code(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApprovalStatus;

    #[test]
    fn test_order_error_status_codes() {
        let cases = [
            (OrderError::Authorization("x".into()), StatusCode::FORBIDDEN),
            (OrderError::Unauthorized("u2".into()), StatusCode::FORBIDDEN),
            (OrderError::NotFound("o1".into()), StatusCode::NOT_FOUND),
            (
                OrderError::InvalidState {
                    id: "o1".into(),
                    current: ApprovalStatus::Approved,
                },
                StatusCode::CONFLICT,
            ),
            (OrderError::InvalidItem("nope".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (OrderError::EmptyCart, StatusCode::BAD_REQUEST),
        ];
        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status_code(), status);
        }
    }

    #[test]
    fn test_invalid_state_code() {
        let error = ApiError::from(OrderError::InvalidState {
            id: "o1".into(),
            current: ApprovalStatus::Rejected,
        });
        assert_eq!(error.code(), "invalid_state");
        assert_eq!(error.to_string(), "Order o1 is already Rejected");
    }

    #[test]
    fn test_product_conflicts_have_distinct_codes() {
        let short = ApiError::from(ProductError::InsufficientStock {
            item_id: "X".into(),
            requested: 2,
            available: 1,
        });
        assert_eq!(short.status_code(), StatusCode::CONFLICT);
        assert_eq!(short.code(), "insufficient_stock");

        let taken = ApiError::from(ProductError::AlreadyExists("X".into()));
        assert_eq!(taken.status_code(), StatusCode::CONFLICT);
        assert_eq!(taken.code(), "already_exists");

        let price = ApiError::from(ProductError::InvalidPrice("X".into()));
        assert_eq!(price.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(price.code(), "invalid_price");
    }

    #[test]
    fn test_session_errors_are_unauthorized() {
        let response = ApiError::from(SessionError::InvalidCredential).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
