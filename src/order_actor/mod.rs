//! Order store and the order lifecycle actions.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
