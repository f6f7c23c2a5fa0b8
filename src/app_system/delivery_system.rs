use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{error, info};

use crate::actor_framework::{Entity, ResourceActor, ResourceClient};
use crate::checkout::Checkout;
use crate::clients::{CatalogClient, CouponClient, MenuClient, OrderClient, PromotionClient, UserClient};
use crate::domain::{Coupon, MenuItem, Order, Promotion, User};
use crate::notifications::Notifier;
use crate::session::Session;

use super::config::AppConfig;
use super::error::SystemError;

/// Ids of the form `{prefix}_{n}`, counting from 1.
fn sequential_ids(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || format!("{}_{}", prefix, counter.fetch_add(1, Ordering::SeqCst))
}

/// The main application system that orchestrates all store actors.
///
/// Responsible for starting up actors, wiring clients together, and handling shutdown.
pub struct DeliverySystem {
    pub user_client: UserClient,
    pub catalog_client: CatalogClient,
    pub coupon_client: CouponClient,
    pub order_client: OrderClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl DeliverySystem {
    pub fn new(config: &AppConfig) -> Self {
        config.backend.warn_on_placeholders();
        let buffer_size = config.actors.buffer_size.max(1);
        let mut handles = Vec::new();

        let users = spawn_store::<User>(&mut handles, "users", buffer_size, sequential_ids("user"));
        let menu = spawn_store::<MenuItem>(&mut handles, "menu", buffer_size, sequential_ids("menu"));
        let promotions =
            spawn_store::<Promotion>(&mut handles, "promotions", buffer_size, sequential_ids("promotion"));
        // Coupons are always stored under their own code.
        let coupons = spawn_store::<Coupon>(&mut handles, "coupons", buffer_size, String::new);
        let orders = spawn_store::<Order>(&mut handles, "orders", buffer_size, sequential_ids("order"));

        let user_client = UserClient::new(users);
        let order_client = OrderClient::new(orders, user_client.clone());
        info!(project_id = %config.backend.project_id, stores = handles.len(), "Delivery system started");

        Self {
            catalog_client: CatalogClient::new(MenuClient::new(menu), PromotionClient::new(promotions)),
            coupon_client: CouponClient::new(coupons),
            order_client,
            user_client,
            handles,
        }
    }

    /// A fresh cart for one visitor.
    pub fn checkout(&self, session: Option<Session>, notifier: Notifier) -> Checkout {
        Checkout::new(session, self.coupon_client.clone(), self.order_client.clone(), notifier)
    }

    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        // Actors stop once every client handle is dropped.
        drop(self.order_client);
        drop(self.coupon_client);
        drop(self.catalog_client);
        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::Shutdown(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

fn spawn_store<T: Entity>(
    handles: &mut Vec<tokio::task::JoinHandle<()>>,
    name: &'static str,
    buffer_size: usize,
    next_id: impl Fn() -> T::Id + Send + Sync + 'static,
) -> ResourceClient<T> {
    let (actor, client) = ResourceActor::<T>::new(name, buffer_size, next_id);
    handles.push(tokio::spawn(actor.run()));
    client
}
