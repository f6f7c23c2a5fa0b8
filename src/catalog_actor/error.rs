use thiserror::Error;

/// Errors that can occur during menu and promotion operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Catalog item not found: {0}")]
    NotFound(String),
    #[error("Catalog validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
