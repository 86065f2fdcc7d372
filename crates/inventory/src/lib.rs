//! Food inventory engine.
//!
//! Tracks perishable items against their expiration dates. The
//! [`FoodTracker`] owns the authoritative [`InventoryStore`], a time-ordered
//! [`ExpirationIndex`] over it, and append-only usage and waste ledgers.
//! Deterministic domain logic only (no IO, no storage).

pub mod expiration;
pub mod ledger;
pub mod shared;
pub mod store;
pub mod tracker;

pub use expiration::{Drained, ExpirationIndex, ExpiringItem, IndexEntry};
pub use ledger::{LedgerRecord, UsageLedger, UsageRecord, WasteLedger, WasteRecord, WasteTotal};
pub use shared::SharedFoodTracker;
pub use store::{InventoryItem, InventoryStore};
pub use tracker::{DonationCandidate, FoodTracker, TrackerConfig, WasteReport};
