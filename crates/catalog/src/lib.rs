//! Item catalog: the ordered pool of auctionable items.
//!
//! Loaded once at startup from a tabular text file and owned by the room for
//! its whole lifetime. `take()` is the single point of sale: it removes the
//! item from availability atomically, so no item can be sold twice. Items
//! that leave the catalog never return, including items that receive no bids.

mod loader;

pub use loader::{load, parse_rows};

use std::fmt;
use types::{Item, ItemId};

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The requested item is not in the available set
    /// (already sold or never existed).
    NotFound(ItemId),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::NotFound(id) => write!(f, "item not available: {}", id),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Immutable ordered list of auctionable items with removal-on-sale.
#[derive(Debug, Clone)]
pub struct Catalog {
    available: Vec<Item>,
}

impl Catalog {
    /// Build a catalog from an ordered item list.
    pub fn new(items: Vec<Item>) -> Self {
        Self { available: items }
    }

    /// All items not yet sold, in load order.
    pub fn all_available(&self) -> &[Item] {
        &self.available
    }

    /// Remove an item from availability.
    ///
    /// This is the only way an item leaves the catalog; a second `take` of
    /// the same identifier fails with `NotFound`.
    pub fn take(&mut self, id: ItemId) -> Result<Item> {
        match self.available.iter().position(|item| item.id == id) {
            Some(idx) => Ok(self.available.remove(idx)),
            None => Err(CatalogError::NotFound(id)),
        }
    }

    /// Whether an identifier is currently available.
    pub fn contains(&self, id: ItemId) -> bool {
        self.available.iter().any(|item| item.id == id)
    }

    /// Whether every item has left the catalog (drives auction completion).
    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    /// Number of items still available.
    pub fn len(&self) -> usize {
        self.available.len()
    }
}
