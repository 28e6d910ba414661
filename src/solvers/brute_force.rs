//! Vendor Subset Search
//!
//! Exhaustively evaluates every set of `k` vendors. The number of subsets grows
//! as C(vendors, k), so this is only practical for few vendors or small `k`; it
//! serves as ground truth for the heuristics.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    catalog::{
        Lot, VendorId,
        index::{restrict_to_vendors, vendor_ids},
    },
    observer::{NoopObserver, SolveObserver},
    solution::Solution,
    solvers::{feasibility::covers, per_item::min_cost_with_observer},
    wanted::WantedItem,
};

/// Every `k`-vendor subset able to cover `wanted`, scored by [`min_cost`](super::per_item::min_cost).
///
/// Subsets are enumerated in lexicographic order of vendor id and returned in
/// that order; use [`ranked`] to sort them by cost. Each solution's vendor set is
/// the evaluated subset, even when the cheapest allocation leaves one of its
/// vendors unused.
pub fn brute_force(wanted: &[WantedItem], lots: &[Lot], k: usize) -> Vec<Solution> {
    brute_force_with_observer(wanted, lots, k, &mut NoopObserver)
}

/// [`brute_force`] reporting each evaluated subset to `observer`.
pub fn brute_force_with_observer(
    wanted: &[WantedItem],
    lots: &[Lot],
    k: usize,
    observer: &mut dyn SolveObserver,
) -> Vec<Solution> {
    let vendors = vendor_ids(lots);
    let mut solutions = Vec::new();

    for combination in Combinations::new(vendors.len(), k) {
        let selected: Vec<&VendorId> = combination
            .iter()
            .filter_map(|&idx| vendors.get(idx).copied())
            .collect();

        let inventory = restrict_to_vendors(lots, &selected);

        if !covers(wanted, inventory.iter().copied()) {
            observer.on_subset_evaluated(&selected, None);
            continue;
        }

        let solution = min_cost_with_observer(wanted, inventory, observer);
        observer.on_subset_evaluated(&selected, Some(solution.total_cost));

        let subset: BTreeSet<VendorId> = selected.into_iter().cloned().collect();
        solutions.push(solution.with_vendor_ids(subset));
    }

    solutions
}

/// Sort solutions cheapest first. Equal costs keep their enumeration order.
pub fn ranked(mut solutions: Vec<Solution>) -> Vec<Solution> {
    solutions.sort_by_key(|solution| solution.total_cost);
    solutions
}

/// Run the subset search for every `k` in `1..=max_k`, keeping the `top_n`
/// cheapest subsets per size.
///
/// Sizes without any covering subset map to an empty list. Sizes above the
/// number of vendors selling anything are left out.
pub fn sweep(
    wanted: &[WantedItem],
    lots: &[Lot],
    max_k: usize,
    top_n: usize,
) -> BTreeMap<usize, Vec<Solution>> {
    sweep_with_observer(wanted, lots, max_k, top_n, &mut NoopObserver)
}

/// [`sweep`] reporting each evaluated subset to `observer`.
pub fn sweep_with_observer(
    wanted: &[WantedItem],
    lots: &[Lot],
    max_k: usize,
    top_n: usize,
    observer: &mut dyn SolveObserver,
) -> BTreeMap<usize, Vec<Solution>> {
    let max_k = max_k.min(vendor_ids(lots).len());

    (1..=max_k)
        .map(|k| {
            let mut best = ranked(brute_force_with_observer(wanted, lots, k, observer));
            best.truncate(top_n);

            (k, best)
        })
        .collect()
}

/// Lexicographic `k`-combinations of `0..n`.
#[derive(Debug)]
struct Combinations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    fn new(n: usize, k: usize) -> Self {
        if k > n {
            return Self {
                n,
                indices: Vec::new(),
                done: true,
            };
        }

        Self {
            n,
            indices: (0..k).collect(),
            done: false,
        }
    }

    /// Advance `indices` to the next combination, returning `false` when exhausted.
    fn advance(&mut self) -> bool {
        let k = self.indices.len();

        // Rightmost position that can still move right
        let Some(pivot) = (0..k)
            .rev()
            .find(|&i| self.indices.get(i).is_some_and(|&v| v < self.n - k + i))
        else {
            return false;
        };

        let mut next = self.indices.get(pivot).copied().unwrap_or_default();

        for slot in self.indices.iter_mut().skip(pivot) {
            next += 1;
            *slot = next;
        }

        true
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let current = self.indices.clone();
        self.done = !self.advance();

        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::{cost::Cost, solvers::per_item::min_cost};

    use super::*;

    fn wanted() -> [WantedItem; 3] {
        [
            WantedItem::new("123", 1, 100, "Item1"),
            WantedItem::new("123", 2, 50, "Item2"),
            WantedItem::new("456", 80, 10, "Item3"),
        ]
    }

    fn just_right() -> [Lot; 4] {
        [
            Lot::new("123", 1, "one", 120, Decimal::new(5, 2)),
            Lot::new("123", 2, "one", 25, Decimal::new(10, 2)).with_matched_color(3),
            Lot::new("123", 2, "two", 25, Decimal::new(25, 2)).with_matched_color(3),
            Lot::new("456", 80, "one", 12, Decimal::new(20, 2)),
        ]
    }

    #[test]
    fn combinations_are_lexicographic() {
        let all: Vec<Vec<usize>> = Combinations::new(4, 2).collect();

        assert_eq!(
            all,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
    }

    #[test]
    fn combinations_edge_sizes() {
        assert_eq!(Combinations::new(3, 0).count(), 1);
        assert_eq!(Combinations::new(3, 3).count(), 1);
        assert_eq!(Combinations::new(2, 3).count(), 0);
        assert_eq!(Combinations::new(5, 3).count(), 10);
        assert_eq!(Combinations::new(2, usize::MAX).count(), 0);
    }

    #[test]
    fn oversized_k_finds_nothing() {
        let wanted = [WantedItem::new("1", 1, 1, "x")];
        let lots = [Lot::new("1", 1, "a", 1, Decimal::new(10, 2))];

        assert!(brute_force(&wanted, &lots, usize::MAX).is_empty());
        assert!(brute_force(&wanted, &lots, 2).is_empty());
    }

    #[test]
    fn sweep_stops_at_vendor_count() {
        let wanted = [WantedItem::new("1", 1, 1, "x")];
        let lots = [
            Lot::new("1", 1, "a", 1, Decimal::new(30, 2)),
            Lot::new("1", 1, "b", 1, Decimal::new(10, 2)),
        ];

        let results = sweep(&wanted, &lots, usize::MAX, 1);

        assert_eq!(results.keys().copied().collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn single_vendor_cannot_cover() {
        assert!(brute_force(&wanted(), &just_right(), 1).is_empty());
    }

    #[test]
    fn both_vendors_match_per_item_cost() {
        let lots = just_right();
        let solutions = brute_force(&wanted(), &lots, 2);

        assert_eq!(solutions.len(), 1);

        let solution = solutions.first();
        let expected = min_cost(&wanted(), &lots);

        assert_eq!(solution.map(|s| s.total_cost), Some(expected.total_cost));
        assert_eq!(solution.map(|s| s.allocation.clone()), Some(expected.allocation));
        assert_eq!(
            solution.map(|s| s.vendor_ids.iter().map(VendorId::as_str).collect::<Vec<_>>()),
            Some(vec!["one", "two"])
        );
    }

    #[test]
    fn ranked_orders_by_cost() {
        let wanted = [WantedItem::new("1", 1, 1, "x")];
        let lots = [
            Lot::new("1", 1, "a", 1, Decimal::new(30, 2)),
            Lot::new("1", 1, "b", 1, Decimal::new(10, 2)),
            Lot::new("1", 1, "c", 1, Decimal::new(20, 2)),
        ];

        let order: Vec<Cost> = ranked(brute_force(&wanted, &lots, 1))
            .into_iter()
            .map(|s| s.total_cost)
            .collect();

        assert_eq!(
            order,
            [
                Cost::Finite(Decimal::new(10, 2)),
                Cost::Finite(Decimal::new(20, 2)),
                Cost::Finite(Decimal::new(30, 2)),
            ]
        );
    }

    #[test]
    fn sweep_keeps_top_n_per_size() {
        let wanted = [WantedItem::new("1", 1, 1, "x")];
        let lots = [
            Lot::new("1", 1, "a", 1, Decimal::new(30, 2)),
            Lot::new("1", 1, "b", 1, Decimal::new(10, 2)),
            Lot::new("1", 1, "c", 1, Decimal::new(20, 2)),
        ];

        let results = sweep(&wanted, &lots, 3, 2);

        assert_eq!(results.len(), 3);
        assert_eq!(results.get(&1).map(Vec::len), Some(2));
        assert_eq!(results.get(&2).map(Vec::len), Some(2));
        assert_eq!(results.get(&3).map(Vec::len), Some(1));
        assert_eq!(
            results
                .get(&1)
                .and_then(|s| s.first())
                .map(|s| s.total_cost),
            Some(Cost::Finite(Decimal::new(10, 2)))
        );
    }
}
