//! Coupon store: discount codes keyed by their code.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
