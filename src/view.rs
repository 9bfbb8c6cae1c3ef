//! Grouping of a flat item set into aisle groups for display.

use serde::Serialize;

use crate::models::Item;

/// One item inside a group. Area key and rank are consumed by the grouping
/// step and not repeated here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedItem {
    pub id: i64,
    pub name: String,
    pub quantity: Option<String>,
    pub checked: bool,
}

/// One aisle group, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub area: String,
    pub items: Vec<GroupedItem>,
}

/// Groups items by area key, ordering groups by ascending area rank.
///
/// Expects `items` already sorted by `(area_order, item_order)`, which is how
/// the store reads them; within a group the scan order is kept. A group's
/// rank is taken from its first-seen member; items of one area are assumed to
/// agree on their rank, and if they don't, the first one wins.
pub fn build_groups(items: &[Item]) -> Vec<Group> {
    let mut order: Vec<(i64, String)> = Vec::new();
    let mut groups: Vec<Group> = Vec::new();

    for item in items {
        let idx = match order.iter().position(|(_, area)| *area == item.area) {
            Some(idx) => idx,
            None => {
                order.push((item.area_order, item.area.clone()));
                groups.push(Group {
                    area: item.area.clone(),
                    items: Vec::new(),
                });
                groups.len() - 1
            }
        };
        groups[idx].items.push(GroupedItem {
            id: item.id,
            name: item.name.clone(),
            quantity: item.quantity.clone(),
            checked: item.checked,
        });
    }

    // Stable sort keeps first-seen order between groups with equal ranks.
    let mut indexed: Vec<(i64, Group)> = order
        .into_iter()
        .map(|(rank, _)| rank)
        .zip(groups)
        .collect();
    indexed.sort_by_key(|(rank, _)| *rank);
    indexed.into_iter().map(|(_, group)| group).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, name: &str, area: &str, area_order: i64, item_order: i64) -> Item {
        Item {
            id,
            name: name.to_string(),
            quantity: None,
            area: area.to_string(),
            area_order,
            item_order,
            checked: false,
        }
    }

    #[test]
    fn test_groups_ordered_by_area_rank() {
        // Pre-sorted by (area_order, item_order), as the store reads them.
        let items = vec![
            item(1, "Bananas", "produce", 1, 1),
            item(2, "Bread", "bakery", 2, 2),
            item(3, "Milk", "dairy", 3, 0),
        ];

        let groups = build_groups(&items);

        let areas: Vec<&str> = groups.iter().map(|g| g.area.as_str()).collect();
        assert_eq!(areas, vec!["produce", "bakery", "dairy"]);
    }

    #[test]
    fn test_items_grouped_under_their_area() {
        let items = vec![
            item(1, "Bananas", "produce", 1, 0),
            item(2, "Apples", "produce", 1, 1),
            item(3, "Milk", "dairy", 3, 2),
        ];

        let groups = build_groups(&items);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].area, "produce");
        assert_eq!(groups[0].items.len(), 2);
        assert_eq!(groups[0].items[0].name, "Bananas");
        assert_eq!(groups[0].items[1].name, "Apples");
        assert_eq!(groups[1].area, "dairy");
        assert_eq!(groups[1].items[0].name, "Milk");
    }

    #[test]
    fn test_item_fields_carried_over() {
        let mut with_qty = item(7, "Milk", "dairy", 3, 0);
        with_qty.quantity = Some("2L".to_string());
        with_qty.checked = true;

        let groups = build_groups(&[with_qty]);

        let grouped = &groups[0].items[0];
        assert_eq!(grouped.id, 7);
        assert_eq!(grouped.name, "Milk");
        assert_eq!(grouped.quantity.as_deref(), Some("2L"));
        assert!(grouped.checked);
    }

    #[test]
    fn test_disagreeing_area_rank_first_seen_wins() {
        let items = vec![
            item(1, "Crisps", "snacks", 9, 0),
            item(2, "Bread", "bakery", 2, 1),
            // Same area as "Crisps" but a contradictory rank; ignored.
            item(3, "Popcorn", "snacks", 1, 2),
        ];

        let groups = build_groups(&items);

        let areas: Vec<&str> = groups.iter().map(|g| g.area.as_str()).collect();
        assert_eq!(areas, vec!["bakery", "snacks"]);
        assert_eq!(groups[1].items.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(build_groups(&[]).is_empty());
    }
}
