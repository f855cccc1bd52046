use crate::actor_framework::FrameworkError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Product already exists: {0}")]
    AlreadyExists(String),
    #[error("Insufficient stock for {item_id}: requested {requested}, available {available}")]
    InsufficientStock {
        item_id: String,
        requested: u32,
        available: u32,
    },
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
    #[error("Invalid price for {0}: must not be negative")]
    InvalidPrice(String),
    #[error("Stock overflow for {0}")]
    StockOverflow(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<ProductError>> for ProductError {
    fn from(error: FrameworkError<ProductError>) -> Self {
        match error {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            FrameworkError::AlreadyExists(id) => ProductError::AlreadyExists(id),
            FrameworkError::Entity(e) => e,
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}
