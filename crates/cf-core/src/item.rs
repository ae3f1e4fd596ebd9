//! Items, cases, and collection entries

use serde::{Deserialize, Serialize};

use crate::rarity::Rarity;

/// A prize item inside a case.
///
/// Identity is by name within a pool: two items in the same case must not
/// share a name if they are meant to be distinguishable in the unique-items
/// view. The optional numeric id is carried for older documents only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub name: String,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
}

impl Item {
    /// Create an item with just a name and rarity (images/descriptions are
    /// presentation data and frequently empty)
    pub fn new(name: impl Into<String>, rarity: Rarity) -> Self {
        Self {
            id: None,
            name: name.into(),
            rarity,
            image: String::new(),
            description: String::new(),
        }
    }
}

/// A full snapshot of a won item.
///
/// Stored independently of the case it came from: case contents may change
/// later, past wins are immutable.
pub type CollectionEntry = Item;

/// A named, described, ordered list of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    pub items: Vec<Item>,
}

impl Case {
    /// Sum of the item weights in this case's pool
    pub fn total_weight(&self) -> u64 {
        self.items.iter().map(|i| i.rarity.weight() as u64).sum()
    }

    /// A case is openable when its pool is non-empty and carries weight.
    /// Catalog loading rejects cases that fail this, so the selector's
    /// preconditions hold everywhere downstream.
    pub fn is_openable(&self) -> bool {
        !self.items.is_empty() && self.total_weight() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_deserialize_defaults() {
        let item: Item = serde_json::from_str(r#"{"name":"Pixel Runner"}"#).unwrap();
        assert_eq!(item.name, "Pixel Runner");
        assert_eq!(item.rarity, Rarity::Common);
        assert!(item.image.is_empty());
        assert!(item.id.is_none());
    }

    #[test]
    fn test_case_total_weight() {
        let case = Case {
            name: "Starter".into(),
            description: String::new(),
            image: String::new(),
            items: vec![
                Item::new("A", Rarity::Common),
                Item::new("B", Rarity::Legendary),
            ],
        };
        assert_eq!(case.total_weight(), 500);
        assert!(case.is_openable());
    }

    #[test]
    fn test_empty_case_not_openable() {
        let case = Case {
            name: "Empty".into(),
            description: String::new(),
            image: String::new(),
            items: vec![],
        };
        assert!(!case.is_openable());
    }
}
