use crate::actor_framework::Entity;
use crate::domain::{CatalogItemCreate, CatalogPatch, MenuItem, Promotion};

use super::actions::{CatalogAction, CatalogActionResult};
use super::error::CatalogError;

fn check_name(name: &str) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::ValidationError("name is required".to_string()));
    }
    Ok(())
}

fn check_price(price: f64) -> Result<(), CatalogError> {
    if !price.is_finite() || price < 0.0 {
        return Err(CatalogError::ValidationError(format!("invalid price: {price}")));
    }
    Ok(())
}

fn check_category(category: Option<&str>) -> Result<String, CatalogError> {
    match category.map(str::trim) {
        Some(category) if !category.is_empty() => Ok(category.to_string()),
        _ => Err(CatalogError::ValidationError("menu items need a category".to_string())),
    }
}

impl Entity for MenuItem {
    type Id = String;
    type CreateParams = CatalogItemCreate;
    type Patch = CatalogPatch;
    type Action = CatalogAction;
    type ActionResult = CatalogActionResult;
    type Error = CatalogError;

    fn from_create_params(id: String, params: CatalogItemCreate) -> Result<Self, CatalogError> {
        check_name(&params.name)?;
        check_price(params.price)?;
        let category = check_category(params.category.as_deref())?;
        Ok(Self {
            id,
            name: params.name,
            price: params.price,
            category,
            image: params.image,
            available: params.available,
            description: params.description,
        })
    }

    fn on_update(&mut self, patch: CatalogPatch) -> Result<(), CatalogError> {
        if let Some(name) = patch.name {
            check_name(&name)?;
            self.name = name;
        }
        if let Some(price) = patch.price {
            check_price(price)?;
            self.price = price;
        }
        if let Some(category) = patch.category {
            self.category = check_category(Some(&category))?;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: CatalogAction) -> Result<CatalogActionResult, CatalogError> {
        match action {
            CatalogAction::ToggleAvailability => {
                self.available = !self.available;
                Ok(self.available)
            }
        }
    }
}

impl Entity for Promotion {
    type Id = String;
    type CreateParams = CatalogItemCreate;
    type Patch = CatalogPatch;
    type Action = CatalogAction;
    type ActionResult = CatalogActionResult;
    type Error = CatalogError;

    fn from_create_params(id: String, params: CatalogItemCreate) -> Result<Self, CatalogError> {
        check_name(&params.name)?;
        check_price(params.price)?;
        Ok(Self {
            id,
            name: params.name,
            price: params.price,
            category: params.category.filter(|category| !category.trim().is_empty()),
            image: params.image,
            available: params.available,
            description: params.description,
        })
    }

    fn on_update(&mut self, patch: CatalogPatch) -> Result<(), CatalogError> {
        if let Some(name) = patch.name {
            check_name(&name)?;
            self.name = name;
        }
        if let Some(price) = patch.price {
            check_price(price)?;
            self.price = price;
        }
        if let Some(category) = patch.category {
            self.category = Some(category).filter(|category| !category.trim().is_empty());
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: CatalogAction) -> Result<CatalogActionResult, CatalogError> {
        match action {
            CatalogAction::ToggleAvailability => {
                self.available = !self.available;
                Ok(self.available)
            }
        }
    }
}
