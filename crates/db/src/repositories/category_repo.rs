//! Repository for the `categories` table.
//!
//! Rows are decoded as [`CategoryRow`] and handed out as core [`Category`]
//! records. Hierarchy fields are written only by `create` and
//! `relocate_subtree`; `update` never touches them.

use lyceum_core::category::{Category, CategoryChanges};
use lyceum_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::CategoryRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, parent_id, title, description, sort_order, level, path, created_at, updated_at";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a fully placed category, returning the stored row.
    pub async fn create(pool: &PgPool, category: &Category) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (id, parent_id, title, description, sort_order, level, path)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, CategoryRow>(&query)
            .bind(category.id)
            .bind(category.parent_id)
            .bind(&category.title)
            .bind(&category.description)
            .bind(category.sort_order)
            .bind(category.level)
            .bind(&category.path)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        let row = sqlx::query_as::<_, CategoryRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Category::from))
    }

    /// All categories ordered by depth, then sort order.
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY level, sort_order, created_at");
        let rows = sqlx::query_as::<_, CategoryRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Direct children of a category ordered by sort order.
    pub async fn find_by_parent_id(
        pool: &PgPool,
        parent_id: DbId,
    ) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories
             WHERE parent_id = $1
             ORDER BY sort_order, created_at"
        );
        let rows = sqlx::query_as::<_, CategoryRow>(&query)
            .bind(parent_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Apply non-hierarchy changes. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &CategoryChanges,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                sort_order = COALESCE($4, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, CategoryRow>(&query)
            .bind(id)
            .bind(&changes.title)
            .bind(&changes.description)
            .bind(changes.sort_order)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Category::from))
    }

    /// Delete a category. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Re-home a category and rewrite `path`/`level` for its whole subtree
    /// in one transaction.
    ///
    /// Descendants are found by the `old_path/` prefix. The moved row itself
    /// is updated by id so that a row without a stored path is still placed.
    pub async fn relocate_subtree(
        pool: &PgPool,
        id: DbId,
        new_parent_id: Option<DbId>,
        old_path: &str,
        new_path: &str,
        level_delta: i32,
    ) -> Result<Option<Category>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let rewritten = sqlx::query(
            "UPDATE categories SET
                path = $2 || substr(path, char_length($1) + 1),
                level = level + $3
             WHERE id <> $4
               AND left(path, char_length($1) + 1) = $1 || '/'",
        )
        .bind(old_path)
        .bind(new_path)
        .bind(level_delta)
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tracing::debug!(category_id = %id, descendants = rewritten, "Rewrote subtree paths");

        let query = format!(
            "UPDATE categories SET
                parent_id = $2,
                path = $3,
                level = level + $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let moved = sqlx::query_as::<_, CategoryRow>(&query)
            .bind(id)
            .bind(new_parent_id)
            .bind(new_path)
            .bind(level_delta)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(moved.map(Category::from))
    }
}
