pub mod cart;
pub mod catalog;
pub mod coupon;
pub mod order;
pub mod user;

pub use cart::*;
pub use catalog::*;
pub use coupon::*;
pub use order::*;
pub use user::*;
