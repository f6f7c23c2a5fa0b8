use std::convert::Infallible;

use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderStatus, DEFAULT_ADDRESS};

use super::actions::{OrderAction, OrderActionResult};
use super::error::OrderError;

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Patch = Infallible;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Error = OrderError;

    /// Creates a new Order from a confirmed cart snapshot.
    ///
    /// The order starts `pendiente` with no delivery person. Totals are taken
    /// as given and never recomputed.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        params.validate()?;
        let address = params
            .address
            .filter(|address| !address.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_string());
        Ok(Self {
            id,
            user_id: params.user_id,
            items: params.items,
            status: OrderStatus::Pending,
            delivery_id: None,
            timestamp: params.timestamp,
            comments: params.comments.filter(|comments| !comments.is_empty()),
            address,
            total: params.total,
            change: params.payment.initial_change(),
            payment: params.payment,
            discount: params.discount,
        })
    }

    fn on_update(&mut self, patch: Infallible) -> Result<(), OrderError> {
        match patch {}
    }

    /// Cancellation is a status, never a removal.
    fn on_delete(&self) -> Result<(), OrderError> {
        Err(OrderError::DeletionNotAllowed(self.id.clone()))
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::ChangeStatus { by, status } => {
                let from = self.change_status(&by, status)?;
                Ok(OrderActionResult::StatusChanged { from, to: status })
            }
            OrderAction::AssignDelivery { by, delivery_id } => {
                let previous = self.assign_delivery(&by, &delivery_id)?;
                Ok(OrderActionResult::DeliveryAssigned { previous })
            }
        }
    }
}
