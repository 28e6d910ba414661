//! Solution Validation
//!
//! Certifies an allocation produced by any solver before it is handed on. A
//! failed check is reported as a [`Violation`], never as an error.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    catalog::{VendorId, Vendors},
    solution::{AllocationEntry, Shortfall},
    wanted::{ItemKey, WantedItem},
};

/// A single failed validation check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// Fewer units were bought than wanted.
    #[error("{wanted}: bought {bought} of {needed}")]
    Unmet {
        /// Wanted item
        wanted: ItemKey,
        /// Units wanted
        needed: u32,
        /// Units bought
        bought: u64,
    },

    /// An entry draws more units than its lot offers.
    #[error("{wanted} from {vendor_id}: bought {quantity}, lot has {available}")]
    OverPurchase {
        /// Wanted item
        wanted: ItemKey,
        /// Selling vendor
        vendor_id: VendorId,
        /// Units bought
        quantity: u32,
        /// Units available in the lot
        available: u32,
    },

    /// An entry buys an item that is not on the wanted list.
    #[error("{wanted} from {vendor_id} is not wanted")]
    UnwantedItem {
        /// Item the entry satisfies
        wanted: ItemKey,
        /// Selling vendor
        vendor_id: VendorId,
    },

    /// The allocation buys from a vendor missing from the vendor set.
    #[error("unknown vendor {0}")]
    UnknownVendor(VendorId),

    /// Spend at a used vendor is below its minimum purchase.
    #[error("{vendor_id}: spend {spend} below minimum {minimum}")]
    BelowMinimum {
        /// Vendor
        vendor_id: VendorId,
        /// Amount spent
        spend: Decimal,
        /// Required minimum
        minimum: Decimal,
    },
}

/// Outcome of validating an allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: SmallVec<[Violation; 4]>,
}

impl ValidationReport {
    /// Whether every check passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Failed checks, in check order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Take ownership of the failed checks.
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations.into_vec()
    }
}

/// Validate an allocation against the wanted list and, optionally, vendor minimums.
///
/// Checks, in order:
///
/// 1. every wanted item receives at least its wanted quantity,
/// 2. no entry buys more than its lot offered,
/// 3. every entry satisfies an item on the wanted list,
/// 4. when `vendors` is given, every vendor in the allocation is known and its
///    spend meets its minimum purchase.
pub fn validate(
    wanted: &[WantedItem],
    allocation: &[AllocationEntry],
    vendors: Option<&Vendors>,
) -> ValidationReport {
    let mut violations = SmallVec::new();
    let bought = bought_by_item(allocation);

    for item in wanted {
        let got = bought.get(item.key()).copied().unwrap_or(0);

        if got < u64::from(item.quantity()) {
            violations.push(Violation::Unmet {
                wanted: item.key().clone(),
                needed: item.quantity(),
                bought: got,
            });
        }
    }

    for entry in allocation {
        if entry.quantity > entry.lot_quantity {
            violations.push(Violation::OverPurchase {
                wanted: entry.wanted.clone(),
                vendor_id: entry.vendor_id.clone(),
                quantity: entry.quantity,
                available: entry.lot_quantity,
            });
        }
    }

    for entry in allocation {
        if !wanted.iter().any(|item| item.key() == &entry.wanted) {
            violations.push(Violation::UnwantedItem {
                wanted: entry.wanted.clone(),
                vendor_id: entry.vendor_id.clone(),
            });
        }
    }

    if let Some(vendors) = vendors {
        for (vendor_id, spend) in spend_by_vendor(allocation) {
            let Some(vendor) = vendors.get(vendor_id) else {
                violations.push(Violation::UnknownVendor(vendor_id.clone()));
                continue;
            };

            if spend < vendor.minimum_purchase() {
                violations.push(Violation::BelowMinimum {
                    vendor_id: vendor_id.clone(),
                    spend,
                    minimum: vendor.minimum_purchase(),
                });
            }
        }
    }

    ValidationReport { violations }
}

/// Whether an allocation passes every check of [`validate`].
pub fn is_valid(
    wanted: &[WantedItem],
    allocation: &[AllocationEntry],
    vendors: Option<&Vendors>,
) -> bool {
    validate(wanted, allocation, vendors).is_valid()
}

/// Demand an allocation leaves unmet, in wanted-list order.
pub fn unsatisfied(wanted: &[WantedItem], allocation: &[AllocationEntry]) -> Vec<Shortfall> {
    let bought = bought_by_item(allocation);

    wanted
        .iter()
        .filter_map(|item| {
            let got = bought.get(item.key()).copied().unwrap_or(0);
            let missing = u64::from(item.quantity()).saturating_sub(got);

            (missing > 0).then(|| Shortfall {
                wanted: item.key().clone(),
                name: item.name().to_string(),
                missing: u32::try_from(missing).unwrap_or(u32::MAX),
            })
        })
        .collect()
}

fn bought_by_item(allocation: &[AllocationEntry]) -> FxHashMap<&ItemKey, u64> {
    let mut bought: FxHashMap<&ItemKey, u64> = FxHashMap::default();

    for entry in allocation {
        *bought.entry(&entry.wanted).or_default() += u64::from(entry.quantity);
    }

    bought
}

fn spend_by_vendor(allocation: &[AllocationEntry]) -> BTreeMap<&VendorId, Decimal> {
    let mut spend: BTreeMap<&VendorId, Decimal> = BTreeMap::new();

    for entry in allocation {
        *spend.entry(&entry.vendor_id).or_default() += entry.spend();
    }

    spend
}
