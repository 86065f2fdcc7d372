//! Time-ordered index of items by expiration date.
//!
//! Entries are advisory pointers `(date, name)` into the [`InventoryStore`].
//! The store stays the source of truth: every entry is re-validated against it
//! when popped, and entries that no longer describe a live item are dropped.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use foodwaste_core::{ExpirationDate, ItemName};

use crate::store::InventoryStore;

/// One index entry. Ordered by date first, then name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexEntry {
    pub expires_on: ExpirationDate,
    pub name: ItemName,
}

/// An item reported as expiring within the queried window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiringItem {
    pub name: ItemName,
    pub expires_on: ExpirationDate,
}

/// Result of one destructive drain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Drained {
    /// Live items, ascending by expiration date.
    pub expiring: Vec<ExpiringItem>,
    /// Stale or duplicate entries popped and discarded along the way.
    pub discarded: usize,
}

/// Min-heap of `(expiration date, name)` entries.
#[derive(Debug, Default, Clone)]
pub struct ExpirationIndex {
    heap: BinaryHeap<Reverse<IndexEntry>>,
}

impl ExpirationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new entry. Earlier entries for the same name are left in place.
    pub fn register(&mut self, name: ItemName, expires_on: ExpirationDate) {
        self.heap.push(Reverse(IndexEntry { expires_on, name }));
    }

    pub fn peek_earliest(&self) -> Option<&IndexEntry> {
        self.heap.peek().map(|Reverse(entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Pop every entry whose date begins at or before `cutoff`.
    ///
    /// An entry is reported only if `store` still holds the item with the same
    /// expiration date, and only once per drain. Everything popped is gone
    /// from the index afterwards, reported or not.
    pub fn drain_expiring(&mut self, cutoff: DateTime<Utc>, store: &InventoryStore) -> Drained {
        let mut out = Drained::default();
        let mut seen: HashSet<ItemName> = HashSet::new();

        while let Some(Reverse(head)) = self.heap.peek() {
            if head.expires_on.starts_at() > cutoff {
                break;
            }
            let Some(Reverse(entry)) = self.heap.pop() else {
                break;
            };

            let live = store
                .get(entry.name.as_str())
                .is_some_and(|item| item.expires_on() == entry.expires_on);

            if live && seen.insert(entry.name.clone()) {
                out.expiring.push(ExpiringItem {
                    name: entry.name,
                    expires_on: entry.expires_on,
                });
            } else {
                tracing::debug!(
                    item = %entry.name,
                    expires_on = %entry.expires_on,
                    "discarding stale expiration entry"
                );
                out.discarded += 1;
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn date(d: u32) -> ExpirationDate {
        ExpirationDate::from_ymd(2025, 1, d).unwrap()
    }

    fn midnight(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, d, 0, 0, 0).unwrap()
    }

    fn stocked(items: &[(&str, u32)]) -> (InventoryStore, ExpirationIndex) {
        let mut store = InventoryStore::new();
        let mut index = ExpirationIndex::new();
        for (name, day) in items {
            store.upsert((*name).into(), 1, date(*day));
            index.register((*name).into(), date(*day));
        }
        (store, index)
    }

    fn names(drained: &Drained) -> Vec<&str> {
        drained.expiring.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn drains_in_date_order_up_to_cutoff() {
        let (store, mut index) = stocked(&[("yogurt", 12), ("milk", 10), ("cheese", 25)]);

        let drained = index.drain_expiring(midnight(12), &store);
        assert_eq!(names(&drained), ["milk", "yogurt"]);
        assert_eq!(drained.discarded, 0);

        assert_eq!(index.len(), 1);
        assert_eq!(index.peek_earliest().unwrap().name.as_str(), "cheese");
    }

    #[test]
    fn cutoff_is_inclusive() {
        let (store, mut index) = stocked(&[("milk", 10)]);
        let drained = index.drain_expiring(midnight(10), &store);
        assert_eq!(names(&drained), ["milk"]);
    }

    #[test]
    fn drain_is_destructive() {
        let (store, mut index) = stocked(&[("milk", 10)]);

        assert_eq!(names(&index.drain_expiring(midnight(11), &store)), ["milk"]);
        assert!(index.drain_expiring(midnight(11), &store).expiring.is_empty());
        assert!(index.is_empty());
    }

    #[test]
    fn stale_entry_after_overwrite_is_discarded() {
        let (mut store, mut index) = stocked(&[("milk", 10)]);

        // Re-add with a later date: the day-10 entry no longer matches the store.
        store.upsert("milk".into(), 4, date(20));
        index.register("milk".into(), date(20));

        let early = index.drain_expiring(midnight(11), &store);
        assert!(early.expiring.is_empty());
        assert_eq!(early.discarded, 1);

        let late = index.drain_expiring(midnight(20), &store);
        assert_eq!(late.expiring[0].expires_on, date(20));
    }

    #[test]
    fn duplicate_live_entries_report_once() {
        let (mut store, mut index) = stocked(&[("milk", 10)]);
        store.upsert("milk".into(), 3, date(10));
        index.register("milk".into(), date(10));

        let drained = index.drain_expiring(midnight(10), &store);
        assert_eq!(names(&drained), ["milk"]);
        assert_eq!(drained.discarded, 1);
    }

    #[test]
    fn entry_for_unknown_item_is_discarded() {
        let store = InventoryStore::new();
        let mut index = ExpirationIndex::new();
        index.register("ghost".into(), date(5));

        let drained = index.drain_expiring(midnight(10), &store);
        assert!(drained.expiring.is_empty());
        assert_eq!(drained.discarded, 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: a drain reports exactly the live items due by the cutoff,
        /// in ascending date order, after any sequence of (re-)adds.
        #[test]
        fn drain_matches_store_truth(
            adds in prop::collection::vec((0usize..6, 1u32..29), 1..40),
            cutoff_day in 1u32..29,
        ) {
            let mut store = InventoryStore::new();
            let mut index = ExpirationIndex::new();
            for (n, day) in &adds {
                let name = ItemName::new(format!("item-{n}"));
                store.upsert(name.clone(), 1, date(*day));
                index.register(name, date(*day));
            }

            let drained = index.drain_expiring(midnight(cutoff_day), &store);

            let mut expected: Vec<(ExpirationDate, ItemName)> = store
                .iter()
                .filter(|i| i.expires_on() <= date(cutoff_day))
                .map(|i| (i.expires_on(), i.name().clone()))
                .collect();
            expected.sort();
            let actual: Vec<(ExpirationDate, ItemName)> = drained
                .expiring
                .iter()
                .map(|e| (e.expires_on, e.name.clone()))
                .collect();

            prop_assert_eq!(actual, expected);
            prop_assert_eq!(drained.expiring.len() + drained.discarded + index.len(), adds.len());
        }
    }
}
