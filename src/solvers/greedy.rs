//! Greedy Vendor Cover
//!
//! Repeatedly picks the vendor able to supply the most still-wanted units, buys
//! what it can from that vendor's cheapest lots, and discards the vendor. Price
//! only decides which lots to take within a chosen vendor, never which vendor to
//! choose, so the result tends to use few vendors but is not cost-optimal.

use std::collections::BTreeMap;

use crate::{
    catalog::{
        Lot, VendorId,
        index::{LotIndex, by_item, by_vendor, cheapest_first},
    },
    observer::{NoopObserver, SolveObserver},
    solution::{AllocationEntry, Shortfall, Solution},
    wanted::{ItemKey, WantedItem},
};

/// Cover the wanted list vendor by vendor, largest coverage first.
///
/// Always returns a finite-cost solution. When demand remains after no vendor
/// can add coverage, the outstanding quantities are reported in
/// [`Solution::shortfall`].
pub fn greedy<'a, I>(wanted: &[WantedItem], lots: I) -> Solution
where
    I: IntoIterator<Item = &'a Lot>,
{
    greedy_with_observer(wanted, lots, &mut NoopObserver)
}

/// [`greedy`] reporting each vendor pick to `observer`.
pub fn greedy_with_observer<'a, I>(
    wanted: &[WantedItem],
    lots: I,
    observer: &mut dyn SolveObserver,
) -> Solution
where
    I: IntoIterator<Item = &'a Lot>,
{
    let mut inventory = VendorInventory::new(lots);
    let mut remaining: Vec<(&WantedItem, u32)> = wanted
        .iter()
        .filter(|item| item.quantity() > 0)
        .map(|item| (item, item.quantity()))
        .collect();

    let mut allocation = Vec::new();

    while !remaining.is_empty() {
        let Some((vendor_id, coverage)) = inventory.best_cover(&remaining) else {
            break;
        };

        let Some(offers) = inventory.take(&vendor_id) else {
            break;
        };

        for (item, needed) in &mut remaining {
            let Some(matching) = offers.get(item.key()) else {
                continue;
            };

            for &lot in matching {
                if *needed == 0 {
                    break;
                }

                let amount = (*needed).min(lot.quantity());

                if amount == 0 {
                    continue;
                }

                allocation.push(AllocationEntry::from_lot(lot, amount));
                *needed -= amount;
            }
        }

        remaining.retain(|(_, needed)| *needed > 0);

        let outstanding = remaining.iter().map(|(_, needed)| u64::from(*needed)).sum();
        observer.on_vendor_selected(&vendor_id, coverage, outstanding);
    }

    let shortfall: Vec<Shortfall> = remaining
        .into_iter()
        .map(|(item, missing)| Shortfall {
            wanted: item.key().clone(),
            name: item.name().to_string(),
            missing,
        })
        .collect();

    if !shortfall.is_empty() {
        observer.on_demand_exhausted(&shortfall);
    }

    Solution::priced(allocation).with_shortfall(shortfall)
}

/// Lots still on offer, grouped per vendor and then per wanted item, cheapest first.
#[derive(Debug)]
struct VendorInventory<'a> {
    vendors: BTreeMap<&'a VendorId, LotIndex<'a, &'a ItemKey>>,
}

impl<'a> VendorInventory<'a> {
    fn new<I>(lots: I) -> Self
    where
        I: IntoIterator<Item = &'a Lot>,
    {
        let vendors = by_vendor(lots)
            .into_iter()
            .map(|(vendor_id, lots)| {
                let mut offers = by_item(lots);

                for group in offers.values_mut() {
                    cheapest_first(group);
                }

                (vendor_id, offers)
            })
            .collect();

        Self { vendors }
    }

    /// Units of still-wanted demand `offers` could supply.
    fn coverage(offers: &LotIndex<'a, &'a ItemKey>, remaining: &[(&WantedItem, u32)]) -> u64 {
        remaining
            .iter()
            .map(|(item, needed)| {
                let available: u64 = offers
                    .get(item.key())
                    .map(|group| group.iter().map(|lot| u64::from(lot.quantity())).sum())
                    .unwrap_or(0);

                available.min(u64::from(*needed))
            })
            .sum()
    }

    /// Vendor with the largest non-zero coverage. Ties go to the smallest vendor id.
    fn best_cover(&self, remaining: &[(&WantedItem, u32)]) -> Option<(VendorId, u64)> {
        let mut best: Option<(&VendorId, u64)> = None;

        for (&vendor_id, offers) in &self.vendors {
            let coverage = Self::coverage(offers, remaining);

            if coverage > best.map_or(0, |(_, c)| c) {
                best = Some((vendor_id, coverage));
            }
        }

        best.map(|(vendor_id, coverage)| (vendor_id.clone(), coverage))
    }

    /// Remove a vendor from consideration, returning its offers.
    fn take(&mut self, vendor_id: &VendorId) -> Option<LotIndex<'a, &'a ItemKey>> {
        self.vendors.remove(vendor_id)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rust_decimal::Decimal;

    use crate::{cost::Cost, validation::is_valid};

    use super::*;

    #[derive(Default)]
    struct Picks(Vec<VendorId>);

    impl SolveObserver for Picks {
        fn on_vendor_selected(&mut self, vendor: &VendorId, _coverage: u64, _remaining: u64) {
            self.0.push(vendor.clone());
        }
    }

    fn wanted() -> [WantedItem; 3] {
        [
            WantedItem::new("3001", 1, 10, "Brick 2 x 4"),
            WantedItem::new("3003", 1, 10, "Brick 2 x 2"),
            WantedItem::new("3004", 1, 10, "Brick 1 x 2"),
        ]
    }

    #[test]
    fn picks_the_widest_vendor_first() {
        let lots = [
            Lot::new("3001", 1, "cheap", 10, Decimal::new(1, 2)),
            Lot::new("3001", 1, "wide", 10, Decimal::new(50, 2)),
            Lot::new("3003", 1, "wide", 10, Decimal::new(50, 2)),
            Lot::new("3004", 1, "wide", 10, Decimal::new(50, 2)),
        ];

        let mut picks = Picks::default();
        let solution = greedy_with_observer(&wanted(), &lots, &mut picks);

        assert_eq!(picks.0, [VendorId::from("wide")]);
        assert_eq!(solution.total_cost, Cost::Finite(Decimal::from(15)));
        assert_eq!(solution.vendor_count(), 1);
        assert!(solution.shortfall.is_empty());
        assert!(is_valid(&wanted(), &solution.allocation, None));
    }

    #[test]
    fn never_revisits_a_vendor() {
        let lots = [
            Lot::new("3001", 1, "a", 10, Decimal::new(10, 2)),
            Lot::new("3003", 1, "a", 4, Decimal::new(10, 2)),
            Lot::new("3003", 1, "b", 6, Decimal::new(10, 2)),
            Lot::new("3004", 1, "c", 10, Decimal::new(10, 2)),
            Lot::new("3004", 1, "a", 1, Decimal::new(10, 2)),
        ];

        let mut picks = Picks::default();
        let solution = greedy_with_observer(&wanted(), &lots, &mut picks);

        let distinct: BTreeSet<&VendorId> = picks.0.iter().collect();

        assert_eq!(distinct.len(), picks.0.len());
        assert!(picks.0.len() <= 3);
        assert_eq!(picks.0.first(), Some(&VendorId::from("a")));
        assert!(solution.shortfall.is_empty());
        assert!(is_valid(&wanted(), &solution.allocation, None));
    }

    #[test]
    fn uses_cheapest_lots_within_a_vendor() {
        let wanted = [WantedItem::new("3001", 1, 5, "Brick 2 x 4")];
        let lots = [
            Lot::new("3001", 1, "a", 5, Decimal::new(40, 2)),
            Lot::new("3001", 1, "a", 3, Decimal::new(10, 2)),
        ];

        let solution = greedy(&wanted, &lots);

        let bought: Vec<(u32, Decimal)> = solution
            .allocation
            .iter()
            .map(|e| (e.quantity, e.unit_cost))
            .collect();

        assert_eq!(
            bought,
            [(3, Decimal::new(10, 2)), (2, Decimal::new(40, 2))]
        );
    }

    #[test]
    fn equal_coverage_goes_to_smallest_vendor_id() {
        let wanted = [WantedItem::new("3001", 1, 5, "Brick 2 x 4")];
        let lots = [
            Lot::new("3001", 1, "zeta", 5, Decimal::new(10, 2)),
            Lot::new("3001", 1, "alpha", 5, Decimal::new(90, 2)),
        ];

        let solution = greedy(&wanted, &lots);

        assert_eq!(
            solution.vendor_ids.iter().map(VendorId::as_str).collect::<Vec<_>>(),
            ["alpha"]
        );
    }

    #[test]
    fn item_without_lots_is_reported_not_infinite() {
        let lots = [
            Lot::new("3001", 1, "a", 10, Decimal::new(10, 2)),
            Lot::new("3003", 1, "a", 10, Decimal::new(10, 2)),
        ];

        let solution = greedy(&wanted(), &lots);

        assert_eq!(solution.total_cost, Cost::Finite(Decimal::from(2)));
        assert_eq!(
            solution.shortfall,
            [Shortfall {
                wanted: ItemKey::new("3004", 1),
                name: "Brick 1 x 2".to_string(),
                missing: 10,
            }]
        );
    }

    #[test]
    fn no_lots_at_all_terminates_immediately() {
        let mut picks = Picks::default();
        let solution = greedy_with_observer(&wanted(), std::iter::empty::<&Lot>(), &mut picks);

        assert!(picks.0.is_empty());
        assert!(solution.allocation.is_empty());
        assert_eq!(solution.shortfall.len(), 3);
    }
}
