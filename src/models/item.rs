use serde::{Deserialize, Serialize};
use std::fmt;

/// An item as persisted for a list.
///
/// `area_order` positions the item's aisle group on the page; `item_order`
/// positions the item within its group. Both are assigned at insert time and
/// rewritten on every full replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub quantity: Option<String>,
    pub area: String,
    pub area_order: i64,
    pub item_order: i64,
    pub checked: bool,
}

/// An item proposed by the upstream categorization pipeline.
///
/// The pipeline guarantees `name`, `area` and `area_order` are present;
/// deserialization enforces that once at the boundary. `quantity` is free
/// text ("2", "500g", "a few") with no unit schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateItem {
    pub name: String,
    #[serde(default)]
    pub quantity: Option<String>,
    pub area: String,
    pub area_order: i64,
}

impl CandidateItem {
    pub fn new(name: impl Into<String>, area: impl Into<String>, area_order: i64) -> Self {
        Self {
            name: name.into(),
            quantity: None,
            area: area.into(),
            area_order,
        }
    }

    pub fn with_quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }
}

impl fmt::Display for CandidateItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.quantity {
            Some(qty) => write!(f, "{} ({})", self.name, qty),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A candidate item with its checked flag resolved against the previous
/// item set. Produced by [`crate::reconcile::reconcile`], consumed by the
/// store's replace path.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledItem {
    pub name: String,
    pub quantity: Option<String>,
    pub area: String,
    pub area_order: i64,
    pub checked: bool,
}
