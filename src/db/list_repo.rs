use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::{CandidateItem, Item, ListRecord, Progress};
use crate::reconcile::reconcile;
use crate::slug;

/// Durable store for shopping lists and their items.
///
/// Owns both tables exclusively; every multi-row write runs in a single
/// transaction so a list and its items change all-or-nothing. Not-found is
/// reported through `Option`/`bool` return values, storage faults propagate
/// as `sqlx::Error` and are never retried here.
#[derive(Clone)]
pub struct ListRepository {
    pool: SqlitePool,
}

// Row types for database queries
#[derive(sqlx::FromRow)]
struct ListRow {
    slug: String,
    supermarket: Option<String>,
    updated_at: String,
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i64,
    name: String,
    quantity: Option<String>,
    area: String,
    area_order: i64,
    item_order: i64,
    checked: bool,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            name: row.name,
            quantity: row.quantity,
            area: row.area,
            area_order: row.area_order,
            item_order: row.item_order,
            checked: row.checked,
        }
    }
}

impl ListRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new list with its full initial item set and returns the
    /// allocated slug.
    ///
    /// Position ranks are the 0-based input indexes; every item starts
    /// unchecked. A slug collision (astronomically rare, see
    /// [`slug::allocate`]) fails the primary-key insert and propagates.
    pub async fn create(
        &self,
        items: &[CandidateItem],
        supermarket: Option<&str>,
    ) -> Result<String, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let list_slug = slug::allocate();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO lists (slug, supermarket, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&list_slug)
        .bind(supermarket)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        for (i, item) in items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO items (list_slug, name, quantity, area, area_order, item_order, checked)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&list_slug)
            .bind(&item.name)
            .bind(&item.quantity)
            .bind(&item.area)
            .bind(item.area_order)
            .bind(i as i64)
            .bind(false)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(list_slug)
    }

    /// Fetches a list with its items in display order, or `None` if the slug
    /// is unknown.
    pub async fn get(&self, list_slug: &str) -> Result<Option<ListRecord>, sqlx::Error> {
        let row: Option<ListRow> =
            sqlx::query_as("SELECT slug, supermarket, updated_at FROM lists WHERE slug = ?")
                .bind(list_slug)
                .fetch_optional(&self.pool)
                .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items: Vec<ItemRow> = sqlx::query_as(
            r#"
            SELECT id, name, quantity, area, area_order, item_order, checked
            FROM items
            WHERE list_slug = ?
            ORDER BY area_order, item_order
            "#,
        )
        .bind(list_slug)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(ListRecord {
            slug: row.slug,
            supermarket: row.supermarket,
            updated_at: row.updated_at,
            items: items.into_iter().map(Item::from).collect(),
        }))
    }

    /// Returns just the version token for cheap change polling.
    pub async fn version(&self, list_slug: &str) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT updated_at FROM lists WHERE slug = ?")
            .bind(list_slug)
            .fetch_optional(&self.pool)
            .await
    }

    /// Sets the checked flag of one item and bumps the list's version clock.
    ///
    /// Returns false when the item does not exist or belongs to another list.
    /// Item ids are unique per store, not per list, so ownership is enforced
    /// by the compound `id AND list_slug` check rather than assumed.
    pub async fn set_item_checked(
        &self,
        list_slug: &str,
        item_id: i64,
        checked: bool,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let owned: Option<i64> =
            sqlx::query_scalar("SELECT id FROM items WHERE id = ? AND list_slug = ?")
                .bind(item_id)
                .bind(list_slug)
                .fetch_optional(&mut *tx)
                .await?;

        if owned.is_none() {
            return Ok(false);
        }

        sqlx::query("UPDATE items SET checked = ? WHERE id = ?")
            .bind(checked)
            .bind(item_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE lists SET updated_at = ? WHERE slug = ?")
            .bind(Utc::now().to_rfc3339())
            .bind(list_slug)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Checked/total counts for a list.
    ///
    /// Returns `None` when the list is missing or has no items; an empty list
    /// has no progress to report rather than 0 of 0.
    pub async fn progress(&self, list_slug: &str) -> Result<Option<Progress>, sqlx::Error> {
        let (total, checked): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COALESCE(SUM(CASE WHEN checked THEN 1 ELSE 0 END), 0)
            FROM items
            WHERE list_slug = ?
            "#,
        )
        .bind(list_slug)
        .fetch_one(&self.pool)
        .await?;

        if total == 0 {
            return Ok(None);
        }

        Ok(Some(Progress { total, checked }))
    }

    /// Replaces a list's entire item set, carrying checked state forward by
    /// name match (see [`reconcile`]).
    ///
    /// The delete and reinsert share one transaction with the version bump.
    /// Position ranks are reassigned from the candidate order. Returns false
    /// for an unknown slug. Concurrent replaces are last-writer-wins at
    /// whole-set granularity; the version token never gates writes.
    pub async fn replace_items(
        &self,
        list_slug: &str,
        candidates: &[CandidateItem],
    ) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<String> = sqlx::query_scalar("SELECT slug FROM lists WHERE slug = ?")
            .bind(list_slug)
            .fetch_optional(&mut *tx)
            .await?;

        if exists.is_none() {
            return Ok(false);
        }

        let existing: Vec<ItemRow> = sqlx::query_as(
            "SELECT id, name, quantity, area, area_order, item_order, checked FROM items WHERE list_slug = ?",
        )
        .bind(list_slug)
        .fetch_all(&mut *tx)
        .await?;
        let existing: Vec<Item> = existing.into_iter().map(Item::from).collect();

        let reconciled = reconcile(&existing, candidates);

        sqlx::query("DELETE FROM items WHERE list_slug = ?")
            .bind(list_slug)
            .execute(&mut *tx)
            .await?;

        for (i, item) in reconciled.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO items (list_slug, name, quantity, area, area_order, item_order, checked)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(list_slug)
            .bind(&item.name)
            .bind(&item.quantity)
            .bind(&item.area)
            .bind(item.area_order)
            .bind(i as i64)
            .bind(item.checked)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("UPDATE lists SET updated_at = ? WHERE slug = ?")
            .bind(Utc::now().to_rfc3339())
            .bind(list_slug)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Deletes lists created before the cutoff, items first, and returns the
    /// number of lists removed. Retention policy, driven by the admin CLI.
    pub async fn purge_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, sqlx::Error> {
        let cutoff = cutoff.to_rfc3339();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "DELETE FROM items WHERE list_slug IN (SELECT slug FROM lists WHERE created_at < ?)",
        )
        .bind(&cutoff)
        .execute(&mut *tx)
        .await?;

        let deleted = sqlx::query("DELETE FROM lists WHERE created_at < ?")
            .bind(&cutoff)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted)
    }

    /// Number of lists created before the cutoff, for dry runs.
    pub async fn count_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM lists WHERE created_at < ?")
            .bind(cutoff.to_rfc3339())
            .fetch_one(&self.pool)
            .await
    }
}
