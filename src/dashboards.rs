//! Role dashboards and the order receipt, derived from store snapshots.
//!
//! Everything here is a pure function of the current `orders`/`users`
//! collections, so views can be rebuilt from every subscription update.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{Order, OrderStatus, PaymentMethod, Role, User};

/// Which dashboard a role lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardKind {
    Admin,
    Client,
    Delivery,
}

impl DashboardKind {
    pub fn for_role(role: Role) -> Option<Self> {
        match role {
            Role::Admin => Some(DashboardKind::Admin),
            Role::Client => Some(DashboardKind::Client),
            Role::Delivery => Some(DashboardKind::Delivery),
            Role::Inactive => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            DashboardKind::Admin => "/dashboard/admin",
            DashboardKind::Client => "/dashboard/client",
            DashboardKind::Delivery => "/dashboard/delivery",
        }
    }
}

/// Delivery person names by id.
pub fn delivery_names(users: &[User]) -> BTreeMap<String, String> {
    users
        .iter()
        .filter(|user| user.role == Role::Delivery)
        .map(|user| (user.id.clone(), user.name.clone()))
        .collect()
}

// Ids break timestamp ties; they are never compared on their own since
// `order_10` sorts before `order_2`.
fn newest_first(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by(|a, b| (b.timestamp, &b.id).cmp(&(a.timestamp, &a.id)));
    orders
}

fn oldest_first(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by(|a, b| (a.timestamp, &a.id).cmp(&(b.timestamp, &b.id)));
    orders
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientDashboard {
    /// The oldest pending order of the client, if any.
    pub current: Option<Order>,
    /// Every non-pending order of the client, newest first.
    pub history: Vec<Order>,
    pub delivery_names: BTreeMap<String, String>,
}

impl ClientDashboard {
    pub fn build(user_id: &str, orders: &[Order], users: &[User]) -> Self {
        let (pending, history): (Vec<Order>, Vec<Order>) = orders
            .iter()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .partition(|order| order.status == OrderStatus::Pending);

        Self {
            current: oldest_first(pending).into_iter().next(),
            history: newest_first(history),
            delivery_names: delivery_names(users),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryDashboard {
    pub active: Vec<Order>,
    pub history: Vec<Order>,
}

impl DeliveryDashboard {
    pub fn build(delivery_id: &str, orders: &[Order]) -> Self {
        let (history, active): (Vec<Order>, Vec<Order>) = orders
            .iter()
            .filter(|order| order.delivery_id.as_deref() == Some(delivery_id))
            .cloned()
            .partition(|order| order.status == OrderStatus::Delivered);

        Self {
            active: oldest_first(active),
            history: newest_first(history),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminDashboard {
    pub orders: Vec<Order>,
    /// Ids of orders that still accept status changes.
    pub editable: Vec<String>,
    pub clients: Vec<User>,
    pub delivery_people: Vec<User>,
}

impl AdminDashboard {
    pub fn build(orders: &[Order], users: &[User]) -> Self {
        let by_role = |role: Role| -> Vec<User> {
            users.iter().filter(|user| user.role == role).cloned().collect()
        };

        Self {
            editable: oldest_first(orders.iter().filter(|order| order.is_editable()).cloned().collect())
                .into_iter()
                .map(|order| order.id)
                .collect(),
            orders: newest_first(orders.to_vec()),
            clients: by_role(Role::Client),
            delivery_people: by_role(Role::Delivery),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    pub line_total: f64,
}

/// What the client sees right after confirming an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_id: String,
    pub status: OrderStatus,
    pub lines: Vec<ReceiptLine>,
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub payment: PaymentMethod,
}

impl From<&Order> for OrderReceipt {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id.clone(),
            status: order.status,
            lines: order
                .items
                .iter()
                .map(|item| ReceiptLine {
                    name: item.name.clone(),
                    quantity: item.quantity,
                    price: item.price,
                    line_total: item.line_total(),
                })
                .collect(),
            subtotal: order.subtotal(),
            discount: order.discount,
            total: order.total,
            address: order.address.clone(),
            comments: order.comments.clone(),
            payment: order.payment,
        }
    }
}
