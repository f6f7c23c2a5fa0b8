use serde::{Deserialize, Serialize};

use super::cart::CartItem;

/// A dish on the regular menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub image: String,
    pub available: bool,
    pub description: String,
}

/// A promotional bundle. Same shape as a menu item, category optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub image: String,
    pub available: bool,
    pub description: String,
}

/// Parameters shared by menu items and promotions on creation.
///
/// When created through the catalog client, the presence of a category
/// decides whether the entry becomes a menu item or a promotion.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItemCreate {
    pub name: String,
    pub price: f64,
    pub category: Option<String>,
    pub image: String,
    pub available: bool,
    pub description: String,
}

impl CatalogItemCreate {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            category: None,
            image: String::new(),
            available: true,
            description: String::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Admin edits to a catalog entry.
#[derive(Debug, Clone, Default)]
pub struct CatalogPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
}

/// Anything a client can put in the cart.
pub trait Selectable {
    fn id(&self) -> &str;
    fn is_available(&self) -> bool;
    fn to_cart_item(&self, quantity: u32) -> CartItem;
}

impl Selectable for MenuItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn to_cart_item(&self, quantity: u32) -> CartItem {
        CartItem {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            image: self.image.clone(),
            category: Some(self.category.clone()),
            quantity,
        }
    }
}

impl Selectable for Promotion {
    fn id(&self) -> &str {
        &self.id
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn to_cart_item(&self, quantity: u32) -> CartItem {
        CartItem {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            image: self.image.clone(),
            category: self.category.clone(),
            quantity,
        }
    }
}

/// Entries a client may order from a full catalog snapshot.
pub fn available<T: Selectable + Clone>(snapshot: &[T]) -> Vec<T> {
    snapshot.iter().filter(|item| item.is_available()).cloned().collect()
}
