#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogAction {
    /// Flip `available`; the result is the new value.
    ToggleAvailability,
}

pub type CatalogActionResult = bool;
