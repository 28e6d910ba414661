//! Per-Item Minimizer
//!
//! Fills each wanted item independently from its cheapest lots. Vendor identity,
//! fixed vendor costs and minimum purchases are ignored, so the result is a lower
//! bound on what the purchase can cost rather than a plan that respects them.

use crate::{
    catalog::{
        Lot,
        index::{by_item, cheapest_first},
    },
    cost::{Cost, line_cost},
    observer::{NoopObserver, SolveObserver},
    solution::{AllocationEntry, Shortfall, Solution},
    wanted::WantedItem,
};

/// Cheapest allocation of every wanted item, ignoring cross-item vendor effects.
///
/// If any item cannot be filled the total cost is [`Cost::Infinite`]; the
/// remaining items are still allocated so the partial result stays informative.
pub fn min_cost<'a, I>(wanted: &[WantedItem], lots: I) -> Solution
where
    I: IntoIterator<Item = &'a Lot>,
{
    min_cost_with_observer(wanted, lots, &mut NoopObserver)
}

/// [`min_cost`] reporting unfillable items to `observer`.
pub fn min_cost_with_observer<'a, I>(
    wanted: &[WantedItem],
    lots: I,
    observer: &mut dyn SolveObserver,
) -> Solution
where
    I: IntoIterator<Item = &'a Lot>,
{
    let index = by_item(lots);

    let mut allocation = Vec::new();
    let mut shortfall = Vec::new();
    let mut total = Cost::ZERO;

    for item in wanted {
        let mut matching = index.get(item.key()).cloned().unwrap_or_default();
        cheapest_first(&mut matching);

        let mut remaining = item.quantity();

        for lot in matching {
            if remaining == 0 {
                break;
            }

            let amount = remaining.min(lot.quantity());

            if amount == 0 {
                continue;
            }

            allocation.push(AllocationEntry::from_lot(lot, amount));
            total = total + line_cost(lot.unit_cost(), amount);
            remaining -= amount;
        }

        if remaining > 0 {
            observer.on_item_unsatisfiable(item, remaining);

            total = Cost::Infinite;
            shortfall.push(Shortfall {
                wanted: item.key().clone(),
                name: item.name().to_string(),
                missing: remaining,
            });
        }
    }

    Solution::new(total, allocation).with_shortfall(shortfall)
}
