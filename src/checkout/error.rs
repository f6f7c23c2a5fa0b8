use thiserror::Error;

use crate::coupon_actor::CouponError;
use crate::domain::{Role, MAX_COMMENT_CHARS};
use crate::order_actor::OrderError;

/// Errors that can occur while filling the cart or confirming it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(u32),
    #[error("Item is not available: {0}")]
    Unavailable(String),
    #[error("Comments are {len} characters long, the limit is {}", MAX_COMMENT_CHARS)]
    CommentTooLong { len: usize },
    #[error("The cart is empty")]
    Empty,
    #[error("Sign in to confirm the order")]
    AuthRequired,
    #[error("Only clients can place orders, this session is {0}")]
    NotAClient(Role),
    #[error("Invalid coupon: {0}")]
    InvalidCoupon(String),
    #[error("Expired coupon: {0}")]
    ExpiredCoupon(String),
    #[error(transparent)]
    Coupon(#[from] CouponError),
    #[error(transparent)]
    Order(#[from] OrderError),
}
