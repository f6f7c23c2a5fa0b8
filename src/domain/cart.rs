use serde::{Deserialize, Serialize};

use super::catalog::Selectable;
use super::order::{OrderItem, PaymentMethod};
use crate::checkout::CartError;

/// Longest accepted order comment, counted in characters.
pub const MAX_COMMENT_CHARS: usize = 100;

/// A menu item or promotion together with how many the client wants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    pub fn to_order_item(&self) -> OrderItem {
        OrderItem {
            id: self.id.clone(),
            name: self.name.clone(),
            quantity: self.quantity,
            price: self.price,
            image: self.image.clone(),
        }
    }
}

/// Client-local cart. Nothing here is persisted until an order is confirmed.
///
/// Every entry keeps a quantity of at least 1; derived amounts are computed on
/// each read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
    discount_percentage: f64,
    comments: String,
    payment: PaymentMethod,
    is_open: bool,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `quantity` of `item`, merging with an existing entry of the same id.
    pub fn add<T: Selectable>(&mut self, item: &T, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        if !item.is_available() {
            return Err(CartError::Unavailable(item.id().to_string()));
        }

        match self.items.iter_mut().find(|entry| entry.id == item.id()) {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(quantity),
            None => self.items.push(item.to_cart_item(quantity)),
        }
        self.is_open = true;
        Ok(())
    }

    /// Returns whether an entry was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|entry| entry.id != id);
        self.items.len() != before
    }

    /// Replace the quantity of an entry. Returns `Ok(false)` when no entry has `id`.
    pub fn update_quantity(&mut self, id: &str, quantity: u32) -> Result<bool, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        match self.items.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn discount_percentage(&self) -> f64 {
        self.discount_percentage
    }

    pub fn set_discount_percentage(&mut self, percentage: f64) {
        if percentage.is_finite() {
            self.discount_percentage = percentage.clamp(0.0, 100.0);
        }
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }

    pub fn set_comments(&mut self, text: impl Into<String>) -> Result<(), CartError> {
        let text = text.into();
        let len = text.chars().count();
        if len > MAX_COMMENT_CHARS {
            return Err(CartError::CommentTooLong { len });
        }
        self.comments = text;
        Ok(())
    }

    pub fn payment(&self) -> PaymentMethod {
        self.payment
    }

    pub fn set_payment(&mut self, payment: PaymentMethod) {
        self.payment = payment;
    }

    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn discount_amount(&self) -> f64 {
        self.subtotal() * self.discount_percentage / 100.0
    }

    pub fn total(&self) -> f64 {
        self.subtotal() - self.discount_amount()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Empties the cart after an order is placed. The payment choice is kept.
    pub fn clear(&mut self) {
        self.items.clear();
        self.comments.clear();
        self.discount_percentage = 0.0;
    }

    pub fn order_items(&self) -> Vec<OrderItem> {
        self.items.iter().map(CartItem::to_order_item).collect()
    }
}

/// Quantity typed into a cart field. Anything that is not a positive number becomes 1.
pub fn coerce_quantity(input: &str) -> u32 {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|quantity| *quantity > 0)
        .unwrap_or(1)
}
