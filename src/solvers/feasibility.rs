//! Feasibility

use crate::{
    catalog::{Lot, index::by_item},
    wanted::WantedItem,
};

/// Whether `lots` hold enough units to fill every wanted item.
///
/// Stops at the first item whose matching supply falls short.
pub fn covers<'a, I>(wanted: &[WantedItem], lots: I) -> bool
where
    I: IntoIterator<Item = &'a Lot>,
{
    let index = by_item(lots);

    wanted.iter().all(|item| {
        let available: u64 = index
            .get(item.key())
            .map(|group| group.iter().map(|lot| u64::from(lot.quantity())).sum())
            .unwrap_or(0);

        available >= u64::from(item.quantity())
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn wanted() -> [WantedItem; 3] {
        [
            WantedItem::new("123", 1, 100, "Item1"),
            WantedItem::new("123", 2, 50, "Item2"),
            WantedItem::new("456", 80, 10, "Item3"),
        ]
    }

    #[test]
    fn missing_item_does_not_cover() {
        let lots = [Lot::new("123", 1, "one", 120, Decimal::new(5, 2))];

        assert!(!covers(&wanted(), &lots));
    }

    #[test]
    fn under_supplied_item_does_not_cover() {
        let lots = [
            Lot::new("123", 1, "one", 120, Decimal::new(5, 2)),
            Lot::new("123", 2, "one", 52, Decimal::new(5, 2)),
            Lot::new("456", 80, "one", 5, Decimal::new(5, 2)),
            Lot::new("456", 81, "one", 20, Decimal::new(5, 2)),
        ];

        assert!(!covers(&wanted(), &lots));
    }

    #[test]
    fn supply_split_across_vendors_covers() {
        let lots = [
            Lot::new("123", 1, "one", 120, Decimal::new(5, 2)),
            Lot::new("123", 2, "one", 25, Decimal::new(10, 2)).with_matched_color(3),
            Lot::new("123", 2, "two", 25, Decimal::new(25, 2)).with_matched_color(3),
            Lot::new("456", 80, "one", 12, Decimal::new(20, 2)),
        ];

        assert!(covers(&wanted(), &lots));
    }

    #[test]
    fn exact_supply_covers() {
        let wanted = [WantedItem::new("123", 1, 100, "Item1")];
        let lots = [
            Lot::new("123", 1, "one", 60, Decimal::new(5, 2)),
            Lot::new("123", 1, "two", 40, Decimal::new(5, 2)),
        ];

        assert!(covers(&wanted, &lots));
        assert!(!covers(&wanted, lots.iter().take(1)));
    }

    #[test]
    fn empty_wanted_list_is_always_covered() {
        assert!(covers(&[], std::iter::empty::<&Lot>()));
    }
}
