//! Catalog Index
//!
//! Groups lots by identity key or by vendor. Grouping never reorders lots: each
//! group lists its lots in input order.

use std::{collections::BTreeMap, hash::Hash};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    catalog::{Lot, VendorId},
    wanted::ItemKey,
};

/// Lots grouped under a key, in input order.
pub type LotIndex<'a, K> = FxHashMap<K, Vec<&'a Lot>>;

/// Group lots by an arbitrary key.
pub fn index_by<'a, K, I, F>(lots: I, key_fn: F) -> LotIndex<'a, K>
where
    K: Eq + Hash,
    I: IntoIterator<Item = &'a Lot>,
    F: Fn(&'a Lot) -> K,
{
    let mut index: LotIndex<'a, K> = FxHashMap::default();

    for lot in lots {
        index.entry(key_fn(lot)).or_default().push(lot);
    }

    index
}

/// Group lots by the identity key of the wanted item they satisfy.
pub fn by_item<'a, I>(lots: I) -> LotIndex<'a, &'a ItemKey>
where
    I: IntoIterator<Item = &'a Lot>,
{
    index_by(lots, Lot::wanted_key)
}

/// Group lots by vendor, ordered by vendor id.
pub fn by_vendor<'a, I>(lots: I) -> BTreeMap<&'a VendorId, Vec<&'a Lot>>
where
    I: IntoIterator<Item = &'a Lot>,
{
    let mut index: BTreeMap<&'a VendorId, Vec<&'a Lot>> = BTreeMap::new();

    for lot in lots {
        index.entry(lot.vendor_id()).or_default().push(lot);
    }

    index
}

/// Distinct vendor ids appearing in `lots`, ascending.
pub fn vendor_ids<'a, I>(lots: I) -> Vec<&'a VendorId>
where
    I: IntoIterator<Item = &'a Lot>,
{
    let mut ids: Vec<&'a VendorId> = lots
        .into_iter()
        .map(Lot::vendor_id)
        .collect::<FxHashSet<_>>()
        .into_iter()
        .collect();

    ids.sort_unstable();
    ids
}

/// Lots sold by one of `vendors`, in input order.
pub fn restrict_to_vendors<'a>(lots: &'a [Lot], vendors: &[&VendorId]) -> Vec<&'a Lot> {
    lots.iter()
        .filter(|lot| vendors.contains(&lot.vendor_id()))
        .collect()
}

/// Sort lots cheapest first. Equal prices keep their input order.
pub(crate) fn cheapest_first(lots: &mut [&Lot]) {
    lots.sort_by_key(|lot| lot.unit_cost());
}
