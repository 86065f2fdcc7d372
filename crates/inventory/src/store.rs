use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use foodwaste_core::{ExpirationDate, InventoryError, InventoryResult, ItemName};

/// Authoritative record for one item on hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    name: ItemName,
    quantity: u64,
    expires_on: ExpirationDate,
}

impl InventoryItem {
    pub fn new(name: ItemName, quantity: u64, expires_on: ExpirationDate) -> Self {
        Self {
            name,
            quantity,
            expires_on,
        }
    }

    pub fn name(&self) -> &ItemName {
        &self.name
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn expires_on(&self) -> ExpirationDate {
        self.expires_on
    }
}

/// Name -> item mapping, iterated in first-insertion order.
///
/// Items are never removed; a record whose quantity reaches zero stays
/// listed until it is overwritten by a new `upsert`.
#[derive(Debug, Default, Clone)]
pub struct InventoryStore {
    items: Vec<InventoryItem>,
    slots: HashMap<ItemName, usize>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for `name`, returning the replaced record.
    ///
    /// A replaced item keeps its original listing position.
    pub fn upsert(
        &mut self,
        name: ItemName,
        quantity: u64,
        expires_on: ExpirationDate,
    ) -> Option<InventoryItem> {
        match self.slots.get(&name) {
            Some(&slot) => {
                let fresh = InventoryItem::new(name, quantity, expires_on);
                Some(core::mem::replace(&mut self.items[slot], fresh))
            }
            None => {
                self.slots.insert(name.clone(), self.items.len());
                self.items.push(InventoryItem::new(name, quantity, expires_on));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&InventoryItem> {
        self.slots.get(name).map(|&slot| &self.items[slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Reduce the quantity of `name` by `by`, returning the remaining quantity.
    ///
    /// Fails without mutating if the item is missing or holds less than `by`.
    pub fn decrement(&mut self, name: &str, by: u64) -> InventoryResult<u64> {
        let slot = *self
            .slots
            .get(name)
            .ok_or_else(|| InventoryError::not_found(name))?;
        let item = &mut self.items[slot];

        if by > item.quantity {
            return Err(InventoryError::insufficient(name, by, item.quantity));
        }

        item.quantity -= by;
        Ok(item.quantity)
    }

    pub fn list(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &InventoryItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
