//! Checked-state reconciliation for whole-list edits.
//!
//! An edit arrives as a complete replacement item set, not a diff. The only
//! job here is carrying forward which items the user already ticked off,
//! matched by case-insensitively normalized name.

use std::collections::HashMap;

use crate::models::{CandidateItem, Item, ReconciledItem};

/// Resolves the checked flag for each candidate against the existing items.
///
/// Candidates pass through unchanged and in order; that order becomes the new
/// position-rank sequence when the store reinserts them. A candidate whose
/// normalized name matches an existing item inherits that item's checked
/// flag; anything else starts unchecked.
///
/// Matching is exact after lowercasing, on purpose: a rename ("milk" to
/// "semi-skimmed milk") is a removal plus an unchecked addition. If two
/// existing items normalize to the same name, the later one wins; names are
/// expected to be de-duplicated upstream.
pub fn reconcile(existing: &[Item], candidates: &[CandidateItem]) -> Vec<ReconciledItem> {
    let checked_by_name: HashMap<String, bool> = existing
        .iter()
        .map(|item| (item.name.to_lowercase(), item.checked))
        .collect();

    candidates
        .iter()
        .map(|candidate| ReconciledItem {
            name: candidate.name.clone(),
            quantity: candidate.quantity.clone(),
            area: candidate.area.clone(),
            area_order: candidate.area_order,
            checked: *checked_by_name
                .get(&candidate.name.to_lowercase())
                .unwrap_or(&false),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, name: &str, checked: bool) -> Item {
        Item {
            id,
            name: name.to_string(),
            quantity: None,
            area: "pantry".to_string(),
            area_order: 7,
            item_order: id,
            checked,
        }
    }

    #[test]
    fn test_preserves_checked_state() {
        let existing = vec![item(1, "Milk", true), item(2, "Bread", false)];
        let candidates = vec![
            CandidateItem::new("Milk", "dairy", 3),
            CandidateItem::new("Eggs", "dairy", 3),
        ];

        let result = reconcile(&existing, &candidates);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name, "Milk");
        assert!(result[0].checked);
        assert_eq!(result[1].name, "Eggs");
        assert!(!result[1].checked);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let existing = vec![item(1, "Bananas", true)];
        let candidates = vec![CandidateItem::new("BANANAS", "produce", 1)];

        let result = reconcile(&existing, &candidates);

        assert!(result[0].checked);
        // The candidate's spelling wins, not the stored one.
        assert_eq!(result[0].name, "BANANAS");
    }

    #[test]
    fn test_removed_items_are_gone() {
        let existing = vec![item(1, "Milk", true), item(2, "Bread", true)];
        let candidates = vec![CandidateItem::new("Milk", "dairy", 3)];

        let result = reconcile(&existing, &candidates);

        assert_eq!(result.len(), 1);
        assert!(!result.iter().any(|i| i.name == "Bread"));
    }

    #[test]
    fn test_rename_loses_checked_state() {
        let existing = vec![item(1, "Milk", true)];
        let candidates = vec![CandidateItem::new("Semi-skimmed milk", "dairy", 3)];

        let result = reconcile(&existing, &candidates);

        assert!(!result[0].checked);
    }

    #[test]
    fn test_candidates_pass_through_unchanged() {
        let existing = vec![];
        let candidates = vec![
            CandidateItem::new("Salmon fillets", "meat", 4).with_quantity("400g"),
            CandidateItem::new("Bananas", "produce", 1).with_quantity("6"),
        ];

        let result = reconcile(&existing, &candidates);

        assert_eq!(result[0].name, "Salmon fillets");
        assert_eq!(result[0].quantity.as_deref(), Some("400g"));
        assert_eq!(result[0].area, "meat");
        assert_eq!(result[0].area_order, 4);
        assert_eq!(result[1].name, "Bananas");
    }

    #[test]
    fn test_duplicate_existing_names_last_wins() {
        let existing = vec![item(1, "Milk", true), item(2, "milk", false)];
        let candidates = vec![CandidateItem::new("Milk", "dairy", 3)];

        let result = reconcile(&existing, &candidates);

        assert!(!result[0].checked);
    }

    #[test]
    fn test_empty_candidates() {
        let existing = vec![item(1, "Milk", true)];
        assert!(reconcile(&existing, &[]).is_empty());
    }
}
