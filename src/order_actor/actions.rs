use crate::domain::{Actor, OrderStatus};

/// The only ways an order changes after creation.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    ChangeStatus { by: Actor, status: OrderStatus },
    /// Sets `deliveryId` and moves the order to `en camino` in one step.
    AssignDelivery { by: Actor, delivery_id: String },
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    StatusChanged { from: OrderStatus, to: OrderStatus },
    DeliveryAssigned { previous: Option<String> },
}
