//! Item identity.

use core::borrow::Borrow;
use serde::{Deserialize, Serialize};

/// Name of an inventory item.
///
/// Identity is the exact string: `"Milk"` and `"milk"` are different items.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemName(String);

impl ItemName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for ItemName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for ItemName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn identity_is_case_sensitive() {
        assert_ne!(ItemName::from("Milk"), ItemName::from("milk"));
    }

    #[test]
    fn map_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(ItemName::from("eggs"), 12u64);
        assert_eq!(map.get("eggs"), Some(&12));
        assert_eq!(map.get("Eggs"), None);
    }
}
