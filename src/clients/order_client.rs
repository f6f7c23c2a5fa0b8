use tracing::{error, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::clients::UserClient;
use crate::dashboards::OrderReceipt;
use crate::domain::{Actor, Order, OrderCreate, OrderStatus, Role};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};

/// Client for interacting with the Order actor.
///
/// This client handles orchestration that spans stores: it checks the user
/// store before creating an order or assigning a delivery person.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    user_client: UserClient,
}

impl_from_framework_error!(OrderError);
impl_client_methods!(OrderClient, Order, OrderError, order, orders);

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, user_client: UserClient) -> Self {
        Self { inner, user_client }
    }

    /// Persist a confirmed cart snapshot as a new `pendiente` order.
    #[instrument(skip(self, params), fields(user_id = %params.user_id, items = params.items.len()))]
    pub async fn place_order(&self, mut params: OrderCreate) -> Result<String, OrderError> {
        info!("Processing place_order request (Client Side)");

        // Step 1: Validate user
        let user = match self.user_client.get_user(params.user_id.clone()).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                error!("User not found");
                return Err(OrderError::InvalidUser(params.user_id));
            }
            Err(e) => {
                error!(error = %e, "User validation failed");
                return Err(OrderError::ActorCommunicationError(format!("User validation failed: {e}")));
            }
        };
        if user.role != Role::Client {
            error!(role = %user.role, "Only clients place orders");
            return Err(OrderError::InvalidUser(format!("{} is not a client", params.user_id)));
        }
        info!(user_name = %user.name, "User validation successful");

        // Step 2: Default to the address on file
        if params.address.is_none() {
            params.address = user.address;
        }

        // Step 3: Create order in ResourceActor
        let id = self.inner.create(params).await?;
        info!(order_id = %id, "Order created");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn change_status(
        &self,
        id: String,
        by: Actor,
        status: OrderStatus,
    ) -> Result<OrderActionResult, OrderError> {
        let result = self
            .inner
            .perform_action(id, OrderAction::ChangeStatus { by, status })
            .await?;
        info!(?result, "Order status changed");
        Ok(result)
    }

    /// A client cancelling their own pending order.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: String, user_id: String) -> Result<OrderActionResult, OrderError> {
        self.change_status(id, Actor::Client { user_id }, OrderStatus::Cancelled)
            .await
    }

    /// Hand an order to a delivery person; sets `deliveryId` and `en camino` together.
    #[instrument(skip(self))]
    pub async fn assign_delivery(
        &self,
        id: String,
        by: Actor,
        delivery_id: String,
    ) -> Result<OrderActionResult, OrderError> {
        if by != Actor::Admin {
            return Err(OrderError::Forbidden("only admins assign deliveries".to_string()));
        }

        match self.user_client.get_user(delivery_id.clone()).await {
            Ok(Some(user)) if user.role == Role::Delivery => {
                info!(delivery_name = %user.name, "Delivery person validated")
            }
            Ok(Some(user)) => {
                error!(role = %user.role, "Target is not a delivery person");
                return Err(OrderError::InvalidUser(format!("{delivery_id} is not a delivery person")));
            }
            Ok(None) => {
                error!("Delivery person not found");
                return Err(OrderError::InvalidUser(delivery_id));
            }
            Err(e) => {
                error!(error = %e, "Delivery person validation failed");
                return Err(OrderError::ActorCommunicationError(format!(
                    "Delivery person validation failed: {e}"
                )));
            }
        }

        let result = self
            .inner
            .perform_action(id, OrderAction::AssignDelivery { by, delivery_id })
            .await?;
        info!(?result, "Delivery assigned");
        Ok(result)
    }

    #[instrument(skip(self))]
    pub async fn order_receipt(&self, id: String) -> Result<OrderReceipt, OrderError> {
        match self.inner.get(id.clone()).await? {
            Some(order) => Ok(OrderReceipt::from(&order)),
            None => Err(OrderError::NotFound(id)),
        }
    }
}
