//! Catalog stores: menu items and promotions share validation and actions.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
