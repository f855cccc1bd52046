use crate::actor_framework::FrameworkError;
use crate::domain::ApprovalStatus;
use crate::product_actor::ProductError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Not authorized: {0}")]
    Authorization(String),
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Order {id} is already {current}")]
    InvalidState { id: String, current: ApprovalStatus },
    #[error("Insufficient stock for {item_id}: requested {requested}, available {available}")]
    InsufficientStock {
        item_id: String,
        requested: u32,
        available: u32,
    },
    #[error("Invalid item: {0}")]
    InvalidItem(String),
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Invalid quantity for {0}: must be greater than zero")]
    InvalidQuantity(String),
    #[error("Caller cannot place orders for user {0}")]
    Unauthorized(String),
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<OrderError>> for OrderError {
    fn from(error: FrameworkError<OrderError>) -> Self {
        match error {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::Entity(e) => e,
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

/// Stock ledger failures as seen by the order workflow.
impl From<ProductError> for OrderError {
    fn from(error: ProductError) -> Self {
        match error {
            ProductError::NotFound(id) => OrderError::InvalidItem(id),
            ProductError::InsufficientStock {
                item_id,
                requested,
                available,
            } => OrderError::InsufficientStock {
                item_id,
                requested,
                available,
            },
            ProductError::ActorCommunicationError(msg) => OrderError::ActorCommunicationError(msg),
            other => OrderError::ValidationError(other.to_string()),
        }
    }
}
