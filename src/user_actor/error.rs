use thiserror::Error;

use crate::domain::Role;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("User validation error: {0}")]
    ValidationError(String),
    #[error("Cannot {action} a user whose role is {role}")]
    RoleChange { action: &'static str, role: Role },
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
