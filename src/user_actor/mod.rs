//! User store: profiles and role management.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
