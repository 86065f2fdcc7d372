//! `foodwaste-core` — shared building blocks for the food inventory engine.
//!
//! This crate contains **pure** primitives (no IO, no storage).

pub mod clock;
pub mod date;
pub mod error;
pub mod name;

pub use clock::{Clock, FixedClock, SystemClock};
pub use date::{ExpirationDate, days_between, window_end};
pub use error::{InventoryError, InventoryResult};
pub use name::ItemName;
