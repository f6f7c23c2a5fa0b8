//! Ordering core of a food delivery service.
//!
//! Menu, promotions, coupons, users and orders each live in their own store
//! actor (see [`actor_framework`]). Typed clients in [`clients`] wrap those
//! stores, [`checkout`] turns a cart into an order, and [`dashboards`] and
//! [`routes`] derive what each role gets to see.

pub mod actor_framework;
pub mod app_system;
pub mod catalog_actor;
pub mod checkout;
pub mod clients;
pub mod coupon_actor;
pub mod dashboards;
pub mod domain;
pub mod notifications;
pub mod order_actor;
pub mod routes;
pub mod session;
pub mod user_actor;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;
