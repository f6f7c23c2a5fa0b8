use thiserror::Error;

/// Errors that can occur during coupon operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CouponError {
    #[error("Coupon not found: {0}")]
    NotFound(String),
    #[error("Coupon is not valid: {0}")]
    Invalid(String),
    #[error("Coupon has expired: {0}")]
    Expired(String),
    #[error("Unreadable expiry date: {0}")]
    InvalidExpiry(String),
    #[error("Coupon validation error: {0}")]
    Validation(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
