//! The food tracking engine.
//!
//! `FoodTracker` owns the inventory store, the expiration index and both
//! ledgers. All mutations go through it so the index is always registered
//! alongside the store and ledger records are written as side effects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use foodwaste_core::{
    Clock, ExpirationDate, InventoryError, InventoryResult, ItemName, SystemClock, window_end,
};

use crate::expiration::{ExpirationIndex, ExpiringItem};
use crate::ledger::{UsageLedger, UsageRecord, WasteLedger, WasteRecord, WasteTotal};
use crate::store::{InventoryItem, InventoryStore};

/// Engine settings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Default window used by [`FoodTracker::monitor_expirations`] and
    /// [`FoodTracker::suggest_donation`].
    pub warning_days: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self { warning_days: 3 }
    }
}

impl TrackerConfig {
    pub fn with_warning_days(mut self, warning_days: u32) -> Self {
        self.warning_days = warning_days;
        self
    }
}

/// An item worth donating before it spoils.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationCandidate {
    pub name: ItemName,
    pub days_remaining: i64,
}

/// Waste log plus per-item totals.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WasteReport {
    pub records: Vec<WasteRecord>,
    pub totals: Vec<WasteTotal>,
}

#[derive(Debug)]
pub struct FoodTracker<C = SystemClock> {
    store: InventoryStore,
    index: ExpirationIndex,
    waste: WasteLedger,
    usage: UsageLedger,
    clock: C,
    config: TrackerConfig,
}

impl FoodTracker<SystemClock> {
    pub fn new(config: TrackerConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for FoodTracker<SystemClock> {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl<C: Clock> FoodTracker<C> {
    pub fn with_clock(config: TrackerConfig, clock: C) -> Self {
        Self {
            store: InventoryStore::new(),
            index: ExpirationIndex::new(),
            waste: WasteLedger::new(),
            usage: UsageLedger::new(),
            clock,
            config,
        }
    }

    pub fn config(&self) -> TrackerConfig {
        self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Add (or replace) an item, parsing `expiration_date` as `YYYY-MM-DD`.
    pub fn add_food(
        &mut self,
        name: impl Into<ItemName>,
        quantity: u64,
        expiration_date: &str,
    ) -> InventoryResult<()> {
        let expires_on: ExpirationDate = expiration_date.parse()?;
        self.add_food_on(name, quantity, expires_on)
    }

    /// Add (or replace) an item with an already-parsed date.
    ///
    /// Replacing keeps the old index entry around; it is discarded the next
    /// time a query pops it and finds the store disagrees.
    pub fn add_food_on(
        &mut self,
        name: impl Into<ItemName>,
        quantity: u64,
        expires_on: ExpirationDate,
    ) -> InventoryResult<()> {
        if quantity == 0 {
            return Err(InventoryError::invalid_quantity(quantity));
        }
        let name = name.into();

        if let Some(previous) = self.store.upsert(name.clone(), quantity, expires_on) {
            tracing::warn!(
                item = %name,
                previous_quantity = previous.quantity(),
                previous_expires_on = %previous.expires_on(),
                "replacing existing inventory record"
            );
        }
        self.index.register(name.clone(), expires_on);

        tracing::info!(item = %name, quantity, expires_on = %expires_on, "added food");
        Ok(())
    }

    /// Consume `quantity_used` units and append a usage record.
    pub fn consume_item(&mut self, name: &str, quantity_used: u64) -> InventoryResult<()> {
        self.ensure_known(name)?;
        if quantity_used == 0 {
            return Err(InventoryError::invalid_quantity(quantity_used));
        }

        let remaining = self.store.decrement(name, quantity_used)?;
        self.usage.append(
            ItemName::from(name),
            UsageRecord {
                quantity_used,
                used_at: self.clock.now(),
            },
        );

        tracing::info!(item = name, quantity_used, remaining, "tracked usage");
        Ok(())
    }

    /// Waste `quantity_wasted` units and append a waste record.
    ///
    /// Holds the same sufficiency precondition as [`Self::consume_item`].
    pub fn record_waste(
        &mut self,
        name: &str,
        quantity_wasted: u64,
        reason: impl Into<String>,
    ) -> InventoryResult<()> {
        self.ensure_known(name)?;
        if quantity_wasted == 0 {
            return Err(InventoryError::invalid_quantity(quantity_wasted));
        }

        let remaining = self.store.decrement(name, quantity_wasted)?;
        let reason = reason.into();
        tracing::info!(item = name, quantity_wasted, remaining, reason = %reason, "recorded waste");

        self.waste.append(WasteRecord {
            name: ItemName::from(name),
            quantity_wasted,
            reason,
            recorded_at: self.clock.now(),
        });
        Ok(())
    }

    /// Items whose expiration date begins at or before `now + warning_days`.
    ///
    /// Destructive: index entries popped here are removed for good, so an
    /// immediate repeat returns nothing for the same items. Already-expired
    /// items are included.
    pub fn query_expiring_soon(
        &mut self,
        now: DateTime<Utc>,
        warning_days: u32,
    ) -> Vec<ExpiringItem> {
        let cutoff = window_end(now, warning_days);
        let drained = self.index.drain_expiring(cutoff, &self.store);

        tracing::debug!(
            %cutoff,
            expiring = drained.expiring.len(),
            discarded = drained.discarded,
            remaining_entries = self.index.len(),
            "expiration query"
        );
        drained.expiring
    }

    /// [`Self::query_expiring_soon`] at clock time with the configured window.
    pub fn monitor_expirations(&mut self) -> Vec<ExpiringItem> {
        let now = self.clock.now();
        self.query_expiring_soon(now, self.config.warning_days)
    }

    /// Items with `0 < days_remaining <= warning_days`, in inventory order.
    ///
    /// Scans the store directly and leaves the expiration index untouched.
    pub fn suggest_donation_candidates(
        &self,
        now: DateTime<Utc>,
        warning_days: u32,
    ) -> Vec<DonationCandidate> {
        let warning_days = i64::from(warning_days);
        self.store
            .iter()
            .filter_map(|item| {
                let days_remaining = item.expires_on().days_until(now);
                (0 < days_remaining && days_remaining <= warning_days).then(|| {
                    DonationCandidate {
                        name: item.name().clone(),
                        days_remaining,
                    }
                })
            })
            .collect()
    }

    /// [`Self::suggest_donation_candidates`] at clock time with the configured window.
    pub fn suggest_donation(&self) -> Vec<DonationCandidate> {
        self.suggest_donation_candidates(self.clock.now(), self.config.warning_days)
    }

    pub fn get_item(&self, name: &str) -> Option<&InventoryItem> {
        self.store.get(name)
    }

    pub fn list_inventory(&self) -> &[InventoryItem] {
        self.store.list()
    }

    pub fn waste_report(&self) -> WasteReport {
        WasteReport {
            records: self.waste.all().to_vec(),
            totals: self.waste.total_by_item(),
        }
    }

    pub fn usage_history(&self, name: &str) -> &[UsageRecord] {
        self.usage.history(name)
    }

    /// Entries still held by the expiration index, stale ones included.
    pub fn pending_index_entries(&self) -> usize {
        self.index.len()
    }

    fn ensure_known(&self, name: &str) -> InventoryResult<()> {
        if self.store.contains(name) {
            Ok(())
        } else {
            Err(InventoryError::not_found(name))
        }
    }
}
