//! Solutions

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use crate::{
    catalog::{Lot, VendorId},
    cost::{Cost, line_cost},
    wanted::{ColorId, ItemKey},
};

/// Units bought from one lot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationEntry {
    /// Identity key of the wanted item these units satisfy
    pub wanted: ItemKey,

    /// Color actually bought
    pub matched_color_id: ColorId,

    /// Vendor selling the lot
    pub vendor_id: VendorId,

    /// Units bought
    pub quantity: u32,

    /// Price per unit
    pub unit_cost: Decimal,

    /// Units the source lot had available
    pub lot_quantity: u32,
}

impl AllocationEntry {
    /// Buy `quantity` units from `lot`.
    pub fn from_lot(lot: &Lot, quantity: u32) -> Self {
        Self {
            wanted: lot.wanted_key().clone(),
            matched_color_id: lot.matched_color_id(),
            vendor_id: lot.vendor_id().clone(),
            quantity,
            unit_cost: lot.unit_cost(),
            lot_quantity: lot.quantity(),
        }
    }

    /// Catalog item identifier.
    pub fn item_id(&self) -> &str {
        &self.wanted.item_id
    }

    /// Amount spent on this entry.
    pub fn spend(&self) -> Decimal {
        line_cost(self.unit_cost, self.quantity)
    }
}

/// Demand left unmet after allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortfall {
    /// Identity key of the wanted item
    pub wanted: ItemKey,

    /// Name of the wanted item
    pub name: String,

    /// Units still missing
    pub missing: u32,
}

/// Result of a single solver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Total cost, infinite when demand could not be met
    pub total_cost: Cost,

    /// Purchases, in the order the solver made them
    pub allocation: Vec<AllocationEntry>,

    /// Vendors the solution draws on
    pub vendor_ids: BTreeSet<VendorId>,

    /// Demand the allocation leaves unmet
    pub shortfall: Vec<Shortfall>,
}

impl Solution {
    /// Build a solution over the vendors appearing in `allocation`.
    pub fn new(total_cost: Cost, allocation: Vec<AllocationEntry>) -> Self {
        let vendor_ids = allocation
            .iter()
            .map(|entry| entry.vendor_id.clone())
            .collect();

        Self {
            total_cost,
            allocation,
            vendor_ids,
            shortfall: Vec::new(),
        }
    }

    /// Build a solution whose cost is the sum of its entries.
    pub fn priced(allocation: Vec<AllocationEntry>) -> Self {
        let total = allocation.iter().map(AllocationEntry::spend).sum::<Decimal>();

        Self::new(Cost::Finite(total), allocation)
    }

    /// The "no solution" outcome: infinite cost, nothing bought.
    pub fn infeasible() -> Self {
        Self::new(Cost::Infinite, Vec::new())
    }

    /// Attach a shortfall diagnostic.
    #[must_use]
    pub fn with_shortfall(mut self, shortfall: Vec<Shortfall>) -> Self {
        self.shortfall = shortfall;
        self
    }

    /// Replace the vendor set, e.g. with the subset a search was restricted to.
    #[must_use]
    pub fn with_vendor_ids(mut self, vendor_ids: BTreeSet<VendorId>) -> Self {
        self.vendor_ids = vendor_ids;
        self
    }

    /// Whether the solution has a finite cost.
    pub fn is_feasible(&self) -> bool {
        self.total_cost.is_finite()
    }

    /// Number of vendors the solution draws on.
    pub fn vendor_count(&self) -> usize {
        self.vendor_ids.len()
    }

    /// Units bought for one wanted item.
    pub fn quantity_for(&self, wanted: &ItemKey) -> u32 {
        self.allocation
            .iter()
            .filter(|entry| &entry.wanted == wanted)
            .map(|entry| entry.quantity)
            .sum()
    }

    /// Amount spent at each vendor appearing in the allocation.
    pub fn spend_by_vendor(&self) -> BTreeMap<&VendorId, Decimal> {
        let mut spend: BTreeMap<&VendorId, Decimal> = BTreeMap::new();

        for entry in &self.allocation {
            *spend.entry(&entry.vendor_id).or_default() += entry.spend();
        }

        spend
    }
}
