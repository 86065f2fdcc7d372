//! Inventory error model.

use thiserror::Error;

/// Result type used across the inventory engine.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Engine-level error.
///
/// Every variant is a local, recoverable failure. The engine checks all
/// preconditions before mutating, so an `Err` always means "nothing changed".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// The operation referenced an item absent from the store.
    #[error("item not found: {name}")]
    NotFound { name: String },

    /// Consumption (or waste) exceeds the quantity on hand.
    #[error("not enough {name} in inventory (requested {requested}, available {available})")]
    InsufficientQuantity {
        name: String,
        requested: u64,
        available: u64,
    },

    /// An expiration date string was not `YYYY-MM-DD`.
    #[error("invalid expiration date {input:?}: {reason}")]
    DateParse { input: String, reason: String },

    /// A quantity argument was zero.
    #[error("invalid quantity: {quantity} (must be at least 1)")]
    InvalidQuantity { quantity: u64 },

    /// The shared engine lock was poisoned by a panicking holder.
    #[error("inventory lock poisoned")]
    Poisoned,
}

impl InventoryError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn insufficient(name: impl Into<String>, requested: u64, available: u64) -> Self {
        Self::InsufficientQuantity {
            name: name.into(),
            requested,
            available,
        }
    }

    pub fn date_parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DateParse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_quantity(quantity: u64) -> Self {
        Self::InvalidQuantity { quantity }
    }

    /// Whether a caller could sensibly re-prompt and try again.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Poisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_quantity_message_names_item() {
        let err = InventoryError::insufficient("bread", 2, 1);
        assert_eq!(
            err.to_string(),
            "not enough bread in inventory (requested 2, available 1)"
        );
    }

    #[test]
    fn poisoned_is_not_a_user_error() {
        assert!(!InventoryError::Poisoned.is_user_error());
        assert!(InventoryError::not_found("eggs").is_user_error());
    }
}
