//! Append-only usage and waste ledgers.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use foodwaste_core::ItemName;

/// A ledger record.
///
/// Records are:
/// - **immutable** (treat them as facts)
/// - **append-only** (ledgers expose no way to edit or remove one)
pub trait LedgerRecord: Clone + core::fmt::Debug {
    /// Stable record type identifier (e.g. "inventory.waste.recorded").
    fn record_type(&self) -> &'static str;

    /// Units of food the record accounts for.
    fn quantity(&self) -> u64;

    /// When the record was written (engine clock time).
    fn recorded_at(&self) -> DateTime<Utc>;
}

/// Food thrown away, with the caller-supplied reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasteRecord {
    pub name: ItemName,
    pub quantity_wasted: u64,
    pub reason: String,
    pub recorded_at: DateTime<Utc>,
}

impl LedgerRecord for WasteRecord {
    fn record_type(&self) -> &'static str {
        "inventory.waste.recorded"
    }

    fn quantity(&self) -> u64 {
        self.quantity_wasted
    }

    fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

/// Food consumed. The item name is the key of the ledger sequence it lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub quantity_used: u64,
    pub used_at: DateTime<Utc>,
}

impl LedgerRecord for UsageRecord {
    fn record_type(&self) -> &'static str {
        "inventory.usage.recorded"
    }

    fn quantity(&self) -> u64 {
        self.quantity_used
    }

    fn recorded_at(&self) -> DateTime<Utc> {
        self.used_at
    }
}

/// Per-item waste total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasteTotal {
    pub name: ItemName,
    pub quantity_wasted: u64,
}

#[derive(Debug, Default, Clone)]
pub struct WasteLedger {
    records: Vec<WasteRecord>,
}

impl WasteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: WasteRecord) {
        self.records.push(record);
    }

    /// All records, oldest first.
    pub fn all(&self) -> &[WasteRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Quantity wasted per item, in order of each item's first waste record.
    pub fn total_by_item(&self) -> Vec<WasteTotal> {
        let mut totals: Vec<WasteTotal> = Vec::new();
        let mut slots: HashMap<&ItemName, usize> = HashMap::new();

        for record in &self.records {
            match slots.get(&record.name) {
                Some(&slot) => totals[slot].quantity_wasted += record.quantity_wasted,
                None => {
                    slots.insert(&record.name, totals.len());
                    totals.push(WasteTotal {
                        name: record.name.clone(),
                        quantity_wasted: record.quantity_wasted,
                    });
                }
            }
        }

        totals
    }
}

#[derive(Debug, Default, Clone)]
pub struct UsageLedger {
    by_item: HashMap<ItemName, Vec<UsageRecord>>,
}

impl UsageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: ItemName, record: UsageRecord) {
        self.by_item.entry(name).or_default().push(record);
    }

    /// Usage of one item, oldest first. Empty for items never consumed.
    pub fn history(&self, name: &str) -> &[UsageRecord] {
        self.by_item.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}
