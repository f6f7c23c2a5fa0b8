use thiserror::Error;

use crate::domain::OrderStatus;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Invalid user: {0}")]
    InvalidUser(String),
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Not allowed: {0}")]
    Forbidden(String),
    #[error("Order {id} is already {status}")]
    Finalized { id: String, status: OrderStatus },
    #[error("Orders cannot be deleted: {0}")]
    DeletionNotAllowed(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
