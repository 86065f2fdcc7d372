//! Thread-safe handle for serving one tracker to several callers.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use foodwaste_core::{Clock, InventoryError, InventoryResult, ItemName, SystemClock};

use crate::expiration::ExpiringItem;
use crate::ledger::UsageRecord;
use crate::store::InventoryItem;
use crate::tracker::{DonationCandidate, FoodTracker, WasteReport};

/// Cloneable handle around a single [`FoodTracker`].
///
/// One mutex covers the store and the expiration index together: a query
/// pops index entries while reading the store, so both must be held at once.
#[derive(Debug)]
pub struct SharedFoodTracker<C = SystemClock> {
    inner: Arc<Mutex<FoodTracker<C>>>,
}

impl<C> Clone for SharedFoodTracker<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Clock> SharedFoodTracker<C> {
    pub fn new(tracker: FoodTracker<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tracker)),
        }
    }

    fn lock(&self) -> InventoryResult<MutexGuard<'_, FoodTracker<C>>> {
        self.inner.lock().map_err(|_| InventoryError::Poisoned)
    }

    /// Run `f` with exclusive access, for multi-step sequences that must not interleave.
    pub fn with<R>(&self, f: impl FnOnce(&mut FoodTracker<C>) -> R) -> InventoryResult<R> {
        let mut guard = self.lock()?;
        Ok(f(&mut *guard))
    }

    pub fn add_food(
        &self,
        name: impl Into<ItemName>,
        quantity: u64,
        expiration_date: &str,
    ) -> InventoryResult<()> {
        self.lock()?.add_food(name, quantity, expiration_date)
    }

    pub fn consume_item(&self, name: &str, quantity_used: u64) -> InventoryResult<()> {
        self.lock()?.consume_item(name, quantity_used)
    }

    pub fn record_waste(
        &self,
        name: &str,
        quantity_wasted: u64,
        reason: impl Into<String>,
    ) -> InventoryResult<()> {
        self.lock()?.record_waste(name, quantity_wasted, reason)
    }

    pub fn query_expiring_soon(
        &self,
        now: DateTime<Utc>,
        warning_days: u32,
    ) -> InventoryResult<Vec<ExpiringItem>> {
        Ok(self.lock()?.query_expiring_soon(now, warning_days))
    }

    pub fn suggest_donation_candidates(
        &self,
        now: DateTime<Utc>,
        warning_days: u32,
    ) -> InventoryResult<Vec<DonationCandidate>> {
        Ok(self.lock()?.suggest_donation_candidates(now, warning_days))
    }

    pub fn list_inventory(&self) -> InventoryResult<Vec<InventoryItem>> {
        Ok(self.lock()?.list_inventory().to_vec())
    }

    pub fn waste_report(&self) -> InventoryResult<WasteReport> {
        Ok(self.lock()?.waste_report())
    }

    pub fn usage_history(&self, name: &str) -> InventoryResult<Vec<UsageRecord>> {
        Ok(self.lock()?.usage_history(name).to_vec())
    }
}
