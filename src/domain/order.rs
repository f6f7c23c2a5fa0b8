use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::cart::MAX_COMMENT_CHARS;
use crate::order_actor::OrderError;

/// Address recorded when the client has no address on file.
pub const DEFAULT_ADDRESS: &str = "Domicilio registrado o personalizado";

/// Lifecycle of an order.
///
/// `Pending → Preparing → OnTheWay → Delivered`, with `Rejected` and
/// `Cancelled` as alternate endings. Nothing leaves a terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "en preparacion")]
    Preparing,
    #[serde(rename = "en camino")]
    OnTheWay,
    #[serde(rename = "entregado")]
    Delivered,
    #[serde(rename = "rechazado")]
    Rejected,
    #[serde(rename = "cancelado")]
    Cancelled,
}

impl OrderStatus {
    /// Statuses an admin may pick from.
    pub const ADMIN_CHOICES: [OrderStatus; 5] = [
        OrderStatus::Preparing,
        OrderStatus::Pending,
        OrderStatus::OnTheWay,
        OrderStatus::Delivered,
        OrderStatus::Rejected,
    ];

    /// Statuses the assigned delivery person may pick from.
    pub const DELIVERY_CHOICES: [OrderStatus; 4] = [
        OrderStatus::Preparing,
        OrderStatus::Pending,
        OrderStatus::OnTheWay,
        OrderStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pendiente",
            OrderStatus::Preparing => "en preparacion",
            OrderStatus::OnTheWay => "en camino",
            OrderStatus::Delivered => "entregado",
            OrderStatus::Rejected => "rechazado",
            OrderStatus::Cancelled => "cancelado",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Rejected | OrderStatus::Cancelled
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::OnTheWay,
            OrderStatus::Delivered,
            OrderStatus::Rejected,
            OrderStatus::Cancelled,
        ]
        .into_iter()
        .find(|status| status.as_str() == s)
        .ok_or_else(|| OrderError::ValidationError(format!("unknown order status: {s}")))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "efectivo")]
    Cash,
    #[serde(rename = "transferencia")]
    Transfer,
}

impl PaymentMethod {
    /// Change owed to the client, tracked only for cash payments.
    pub fn initial_change(&self) -> Option<f64> {
        match self {
            PaymentMethod::Cash => Some(0.0),
            PaymentMethod::Transfer => None,
        }
    }
}

/// One line of an order, frozen at confirmation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    pub image: String,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Represents a confirmed customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(skip)]
    pub id: String,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub delivery_id: Option<String>,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub address: String,
    pub total: f64,
    pub payment: PaymentMethod,
    pub change: Option<f64>,
    pub discount: f64,
}

/// Parameters for creating a new order from a cart snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCreate {
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub discount: f64,
    pub address: Option<String>,
    pub comments: Option<String>,
    pub payment: PaymentMethod,
    pub timestamp: i64,
}

impl OrderCreate {
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.user_id.is_empty() {
            return Err(OrderError::InvalidUser("missing user id".to_string()));
        }
        if self.items.is_empty() {
            return Err(OrderError::ValidationError("an order needs at least one item".to_string()));
        }
        if let Some(item) = self.items.iter().find(|item| item.quantity == 0) {
            return Err(OrderError::ValidationError(format!("item {} has quantity 0", item.id)));
        }
        if let Some(item) = self
            .items
            .iter()
            .find(|item| !item.price.is_finite() || item.price < 0.0)
        {
            return Err(OrderError::ValidationError(format!("item {} has an invalid price", item.id)));
        }
        if self
            .comments
            .as_ref()
            .is_some_and(|comments| comments.chars().count() > MAX_COMMENT_CHARS)
        {
            return Err(OrderError::ValidationError(format!(
                "comments exceed {MAX_COMMENT_CHARS} characters"
            )));
        }
        Ok(())
    }
}

/// Who is asking for an order change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Client { user_id: String },
    Admin,
    Delivery { delivery_id: String },
}

impl Order {
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    /// Whether any further status or delivery change can be accepted.
    pub fn is_editable(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Move the order to `status` on behalf of `by`. Returns the previous status.
    pub fn change_status(&mut self, by: &Actor, status: OrderStatus) -> Result<OrderStatus, OrderError> {
        self.ensure_editable()?;

        match by {
            Actor::Client { user_id } => {
                if *user_id != self.user_id {
                    return Err(OrderError::Forbidden("order belongs to another client".to_string()));
                }
                if status != OrderStatus::Cancelled {
                    return Err(OrderError::Forbidden("clients can only cancel orders".to_string()));
                }
                if self.status != OrderStatus::Pending {
                    return Err(OrderError::Forbidden(format!(
                        "cannot cancel an order that is {}",
                        self.status
                    )));
                }
            }
            Actor::Admin => {
                if !OrderStatus::ADMIN_CHOICES.contains(&status) {
                    return Err(OrderError::Forbidden(format!("admins cannot set {status}")));
                }
            }
            Actor::Delivery { delivery_id } => {
                if self.delivery_id.as_deref() != Some(delivery_id.as_str()) {
                    return Err(OrderError::Forbidden("order is not assigned to you".to_string()));
                }
                if !OrderStatus::DELIVERY_CHOICES.contains(&status) {
                    return Err(OrderError::Forbidden(format!("delivery cannot set {status}")));
                }
            }
        }

        Ok(std::mem::replace(&mut self.status, status))
    }

    /// Hand the order to a delivery person. Always puts it `OnTheWay`.
    ///
    /// Returns the previously assigned delivery id, if any.
    pub fn assign_delivery(&mut self, by: &Actor, delivery_id: &str) -> Result<Option<String>, OrderError> {
        self.ensure_editable()?;

        if *by != Actor::Admin {
            return Err(OrderError::Forbidden("only admins assign deliveries".to_string()));
        }
        if delivery_id.trim().is_empty() {
            return Err(OrderError::ValidationError("delivery id is required".to_string()));
        }

        let previous = self.delivery_id.replace(delivery_id.to_string());
        self.status = OrderStatus::OnTheWay;
        Ok(previous)
    }

    fn ensure_editable(&self) -> Result<(), OrderError> {
        if self.is_editable() {
            Ok(())
        } else {
            Err(OrderError::Finalized {
                id: self.id.clone(),
                status: self.status,
            })
        }
    }
}
