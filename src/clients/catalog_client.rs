use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::catalog_actor::{CatalogAction, CatalogError};
use crate::domain::{CatalogItemCreate, CatalogPatch, MenuItem, Promotion};

/// Client for the menu actor.
#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<MenuItem>,
}

/// Client for the promotions actor.
#[derive(Clone)]
pub struct PromotionClient {
    inner: ResourceClient<Promotion>,
}

impl_from_framework_error!(CatalogError);
impl_basic_client!(MenuClient, MenuItem, CatalogError, menu_item, menu_items);
impl_basic_client!(PromotionClient, Promotion, CatalogError, promotion, promotions);

/// Which collection a catalog entry lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEntry {
    Menu(String),
    Promotion(String),
}

/// Admin facade over both catalog collections.
#[derive(Clone)]
pub struct CatalogClient {
    pub menu: MenuClient,
    pub promotions: PromotionClient,
}

impl CatalogClient {
    pub fn new(menu: MenuClient, promotions: PromotionClient) -> Self {
        Self { menu, promotions }
    }

    /// Entries with a category go to the menu, the rest become promotions.
    #[instrument(skip(self))]
    pub async fn create_item(&self, params: CatalogItemCreate) -> Result<CatalogEntry, CatalogError> {
        let has_category = params
            .category
            .as_deref()
            .is_some_and(|category| !category.trim().is_empty());

        let entry = if has_category {
            CatalogEntry::Menu(self.menu.inner.create(params).await?)
        } else {
            CatalogEntry::Promotion(self.promotions.inner.create(params).await?)
        };
        info!(?entry, "Catalog entry created");
        Ok(entry)
    }

    #[instrument(skip(self))]
    pub async fn update_item(&self, entry: CatalogEntry, patch: CatalogPatch) -> Result<(), CatalogError> {
        debug!("Sending request");
        match entry {
            CatalogEntry::Menu(id) => self.menu.inner.update(id, patch).await.map(|_| ())?,
            CatalogEntry::Promotion(id) => self.promotions.inner.update(id, patch).await.map(|_| ())?,
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, entry: CatalogEntry) -> Result<(), CatalogError> {
        match entry {
            CatalogEntry::Menu(id) => self.menu.delete_menu_item(id).await,
            CatalogEntry::Promotion(id) => self.promotions.delete_promotion(id).await,
        }
    }

    /// Returns the new availability.
    #[instrument(skip(self))]
    pub async fn toggle_availability(&self, entry: CatalogEntry) -> Result<bool, CatalogError> {
        let action = CatalogAction::ToggleAvailability;
        let available = match entry {
            CatalogEntry::Menu(id) => self.menu.inner.perform_action(id, action).await?,
            CatalogEntry::Promotion(id) => self.promotions.inner.perform_action(id, action).await?,
        };
        info!(available, "Availability changed");
        Ok(available)
    }
}
