use serde::Serialize;

use super::Item;

/// A list as read back from the store: the list row plus its items in
/// display order (area rank, then position within the aisle).
///
/// `updated_at` is the list's version clock. It is an opaque RFC 3339 UTC
/// string; callers compare tokens for inequality to detect change and never
/// parse them.
#[derive(Debug, Clone, Serialize)]
pub struct ListRecord {
    pub slug: String,
    pub supermarket: Option<String>,
    pub updated_at: String,
    pub items: Vec<Item>,
}

/// Checked/total counts for a list.
///
/// The store returns no progress at all for a list with zero items, so this
/// type never represents 0/0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub total: i64,
    pub checked: i64,
}
