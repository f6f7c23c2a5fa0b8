#[macro_use]
mod macros;

pub mod catalog_client;
pub mod coupon_client;
pub mod order_client;
pub mod user_client;

pub use catalog_client::*;
pub use coupon_client::*;
pub use order_client::*;
pub use user_client::*;
