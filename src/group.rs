//! Aisle Grouping
//!
//! Pure fan-out of the collection into per-aisle buckets with
//! deterministically ordered keys.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::Item;

/// Aisle name -> items in that aisle, keys ascending under [`aisle_cmp`].
/// Rebuilt on every render, never mutated in place.
pub type GroupedView = Vec<(String, Vec<Item>)>;

/// Locale-style comparator for aisle keys: case-insensitive first, byte
/// order as the tiebreak.
pub fn aisle_cmp(a: &str, b: &str) -> Ordering {
    match a.to_lowercase().cmp(&b.to_lowercase()) {
        Ordering::Equal => a.cmp(b),
        unequal => unequal,
    }
}

/// Partition `items` into aisle buckets. Items keep their input order within
/// each bucket; an item listed under several aisles appears once per aisle;
/// duplicate aisle names within one item count once. Aisles with no
/// surviving items after the filter get no bucket at all.
pub fn group_by_aisle(items: &[Item], needed_only: bool) -> GroupedView {
    let mut buckets: GroupedView = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in items.iter().filter(|i| !needed_only || i.needed) {
        let mut seen: Vec<&str> = Vec::new();
        for aisle in &item.aisle {
            if seen.contains(&aisle.as_str()) {
                continue;
            }
            seen.push(aisle);
            let at = *index.entry(aisle.clone()).or_insert_with(|| {
                buckets.push((aisle.clone(), Vec::new()));
                buckets.len() - 1
            });
            buckets[at].1.push(item.clone());
        }
    }

    buckets.sort_by(|a, b| aisle_cmp(&a.0, &b.0));
    buckets
}
