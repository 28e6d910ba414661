//! Catalog
//!
//! Price lots offered by vendors, and the vendors themselves.

use std::fmt;

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::wanted::{ColorId, ItemKey};

pub mod index;

/// Vendor identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VendorId(String);

impl VendorId {
    /// Create a new vendor identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VendorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VendorId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for VendorId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A vendor's offer of a quantity of one item/color at one unit price.
///
/// `wanted` links the lot back to the wanted list; `matched_color_id` is the
/// color actually priced, which differs from the wanted color when the catalog
/// collaborator substituted a similar color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lot {
    wanted: ItemKey,
    matched_color_id: ColorId,
    vendor_id: VendorId,
    quantity: u32,
    unit_cost: Decimal,
}

impl Lot {
    /// Create a lot priced in the wanted color.
    pub fn new(
        item_id: impl Into<String>,
        color_id: ColorId,
        vendor_id: impl Into<VendorId>,
        quantity: u32,
        unit_cost: Decimal,
    ) -> Self {
        Self {
            wanted: ItemKey::new(item_id, color_id),
            matched_color_id: color_id,
            vendor_id: vendor_id.into(),
            quantity,
            unit_cost,
        }
    }

    /// Mark this lot as a substitute priced in a different color.
    #[must_use]
    pub fn with_matched_color(mut self, color_id: ColorId) -> Self {
        self.matched_color_id = color_id;
        self
    }

    /// Identity key of the wanted item this lot can satisfy.
    pub fn wanted_key(&self) -> &ItemKey {
        &self.wanted
    }

    /// Catalog item identifier.
    pub fn item_id(&self) -> &str {
        &self.wanted.item_id
    }

    /// Wanted color this lot stands in for.
    pub fn wanted_color_id(&self) -> ColorId {
        self.wanted.color_id
    }

    /// Color actually priced.
    pub fn matched_color_id(&self) -> ColorId {
        self.matched_color_id
    }

    /// Selling vendor.
    pub fn vendor_id(&self) -> &VendorId {
        &self.vendor_id
    }

    /// Maximum purchasable quantity.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price per unit.
    pub fn unit_cost(&self) -> Decimal {
        self.unit_cost
    }
}

/// Vendor metadata relevant to purchasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vendor {
    id: VendorId,
    minimum_purchase: Decimal,
}

impl Vendor {
    /// Create a vendor without a minimum purchase.
    pub fn new(id: impl Into<VendorId>) -> Self {
        Self {
            id: id.into(),
            minimum_purchase: Decimal::ZERO,
        }
    }

    /// Set the minimum spend required to order from this vendor at all.
    #[must_use]
    pub fn with_minimum_purchase(mut self, amount: Decimal) -> Self {
        self.minimum_purchase = amount;
        self
    }

    /// Vendor identifier.
    pub fn id(&self) -> &VendorId {
        &self.id
    }

    /// Minimum spend, zero when the vendor has none.
    pub fn minimum_purchase(&self) -> Decimal {
        self.minimum_purchase
    }
}

/// Vendor lookup keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct Vendors {
    by_id: FxHashMap<VendorId, Vendor>,
}

impl Vendors {
    /// Look up a vendor.
    pub fn get(&self, id: &VendorId) -> Option<&Vendor> {
        self.by_id.get(id)
    }

    /// Whether the vendor is known.
    pub fn contains(&self, id: &VendorId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Number of known vendors.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether no vendors are known.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Iterate over known vendors in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Vendor> {
        self.by_id.values()
    }

    /// Vendors for every id appearing in `lots`, none of them with a minimum purchase.
    pub fn from_lots(lots: &[Lot]) -> Self {
        lots.iter()
            .map(|lot| Vendor::new(lot.vendor_id().clone()))
            .collect()
    }
}

impl FromIterator<Vendor> for Vendors {
    fn from_iter<T: IntoIterator<Item = Vendor>>(iter: T) -> Self {
        Self {
            by_id: iter
                .into_iter()
                .map(|vendor| (vendor.id.clone(), vendor))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lot_defaults_matched_color_to_wanted_color() {
        let lot = Lot::new("3001", 5, "a", 10, Decimal::new(10, 2));

        assert_eq!(lot.wanted_color_id(), 5);
        assert_eq!(lot.matched_color_id(), 5);
        assert_eq!(lot.wanted_key(), &ItemKey::new("3001", 5));
    }

    #[test]
    fn substitute_lot_keeps_wanted_key() {
        let lot = Lot::new("3001", 5, "a", 10, Decimal::new(10, 2)).with_matched_color(7);

        assert_eq!(lot.wanted_key(), &ItemKey::new("3001", 5));
        assert_eq!(lot.matched_color_id(), 7);
    }

    #[test]
    fn vendors_from_lots_deduplicates_ids() {
        let lots = [
            Lot::new("3001", 5, "a", 10, Decimal::new(10, 2)),
            Lot::new("3002", 5, "a", 10, Decimal::new(10, 2)),
            Lot::new("3001", 5, "b", 10, Decimal::new(10, 2)),
        ];

        let vendors = Vendors::from_lots(&lots);

        assert_eq!(vendors.len(), 2);
        assert!(vendors.contains(&VendorId::from("a")));
        assert!(vendors.contains(&VendorId::from("b")));
        assert!(
            vendors
                .iter()
                .all(|vendor| vendor.minimum_purchase() == Decimal::ZERO)
        );
    }

    #[test]
    fn later_vendor_record_wins_on_duplicate_id() {
        let vendors: Vendors = [
            Vendor::new("a"),
            Vendor::new("a").with_minimum_purchase(Decimal::from(5)),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            vendors
                .get(&VendorId::from("a"))
                .map(Vendor::minimum_purchase),
            Some(Decimal::from(5))
        );
    }
}
