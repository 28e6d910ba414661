//! Wanted List Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::wanted::{ColorId, ItemKey, WantedItem};

/// Wrapper for the wanted list in YAML
#[derive(Debug, Deserialize)]
pub struct WantedFixture {
    /// Wanted rows, possibly repeating an item
    pub items: Vec<WantedItemFixture>,
}

/// Wanted row from YAML
#[derive(Debug, Deserialize)]
pub struct WantedItemFixture {
    /// Catalog item identifier
    pub item: String,

    /// Wanted color
    pub color: ColorId,

    /// Units wanted
    pub quantity: u32,

    /// Display name, defaults to the item identifier
    #[serde(default)]
    pub name: Option<String>,
}

impl WantedFixture {
    /// Convert to wanted items, merging rows with the same item and color.
    ///
    /// Merged rows keep the position and name of their first occurrence.
    pub fn into_wanted_items(self) -> Vec<WantedItem> {
        let mut merged: Vec<WantedItem> = Vec::with_capacity(self.items.len());
        let mut positions: FxHashMap<ItemKey, usize> = FxHashMap::default();

        for row in self.items {
            let key = ItemKey::new(row.item.clone(), row.color);

            if let Some(existing) = positions.get(&key).and_then(|&idx| merged.get_mut(idx)) {
                let quantity = existing.quantity().saturating_add(row.quantity);
                let name = existing.name().to_string();

                *existing = WantedItem::new(row.item, row.color, quantity, name);

                continue;
            }

            let name = row.name.unwrap_or_else(|| row.item.clone());

            positions.insert(key, merged.len());
            merged.push(WantedItem::new(row.item, row.color, row.quantity, name));
        }

        merged
    }
}
