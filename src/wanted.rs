//! Wanted Items

use std::fmt;

/// Color identifier as used by the catalog.
pub type ColorId = u32;

/// Identity key matching demand to supply: an item in a specific color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    /// Catalog item identifier
    pub item_id: String,

    /// Color identifier
    pub color_id: ColorId,
}

impl ItemKey {
    /// Create a new identity key.
    pub fn new(item_id: impl Into<String>, color_id: ColorId) -> Self {
        Self {
            item_id: item_id.into(),
            color_id,
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.item_id, self.color_id)
    }
}

/// A line of the wanted list: how many units of one item/color must be bought.
///
/// Duplicate rows sharing an identity key are expected to be merged before they
/// reach any solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WantedItem {
    key: ItemKey,
    quantity: u32,
    name: String,
}

impl WantedItem {
    /// Create a new wanted item.
    pub fn new(
        item_id: impl Into<String>,
        color_id: ColorId,
        quantity: u32,
        name: impl Into<String>,
    ) -> Self {
        Self {
            key: ItemKey::new(item_id, color_id),
            quantity,
            name: name.into(),
        }
    }

    /// Identity key of this item.
    pub fn key(&self) -> &ItemKey {
        &self.key
    }

    /// Catalog item identifier.
    pub fn item_id(&self) -> &str {
        &self.key.item_id
    }

    /// Wanted color.
    pub fn color_id(&self) -> ColorId {
        self.key.color_id
    }

    /// Number of units that must be bought.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Human readable name, used for diagnostics only.
    pub fn name(&self) -> &str {
        &self.name
    }
}
