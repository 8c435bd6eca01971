//! Repository for the `toc_items` table.
//!
//! Entries are always addressed through their owner, a [`TocEntity`].

use lyceum_core::toc::TocEntity;
use lyceum_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::toc_item::{TocItem, UpdateTocItem};
use crate::repositories::{ArticleRepo, CourseRepo, NoteRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, entity_type, entity_id, title, anchor_id, level, sort_order, created_at, updated_at";

/// Provides CRUD operations for toc entries.
pub struct TocItemRepo;

impl TocItemRepo {
    /// Insert an entry for `entity`.
    pub async fn create(
        pool: &PgPool,
        entity: TocEntity,
        title: &str,
        anchor_id: &str,
        level: i32,
        sort_order: i32,
    ) -> Result<TocItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO toc_items (id, entity_type, entity_id, title, anchor_id, level, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TocItem>(&query)
            .bind(new_id())
            .bind(entity.entity_type())
            .bind(entity.entity_id())
            .bind(title)
            .bind(anchor_id)
            .bind(level)
            .bind(sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TocItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM toc_items WHERE id = $1");
        sqlx::query_as::<_, TocItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The table of contents of one entity, in display order.
    pub async fn find_by_entity(
        pool: &PgPool,
        entity: TocEntity,
    ) -> Result<Vec<TocItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM toc_items
             WHERE entity_type = $1 AND entity_id = $2
             ORDER BY sort_order, created_at"
        );
        sqlx::query_as::<_, TocItem>(&query)
            .bind(entity.entity_type())
            .bind(entity.entity_id())
            .fetch_all(pool)
            .await
    }

    /// Update an entry. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTocItem,
    ) -> Result<Option<TocItem>, sqlx::Error> {
        let query = format!(
            "UPDATE toc_items SET
                title = COALESCE($2, title),
                anchor_id = COALESCE($3, anchor_id),
                level = COALESCE($4, level),
                sort_order = COALESCE($5, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TocItem>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.anchor_id)
            .bind(input.level)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM toc_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether the owner named by `entity` exists in its own table.
    pub async fn entity_exists(pool: &PgPool, entity: TocEntity) -> Result<bool, sqlx::Error> {
        match entity {
            TocEntity::Article(id) => ArticleRepo::exists(pool, id).await,
            TocEntity::Note(id) => NoteRepo::exists(pool, id).await,
            TocEntity::Course(id) => CourseRepo::exists(pool, id).await,
        }
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Remove every entry owned by `(entity_type, entity_id)` within an
    /// existing transaction.
    pub(crate) async fn delete_by_entity_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        entity_type: &str,
        entity_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM toc_items WHERE entity_type = $1 AND entity_id = $2")
            .bind(entity_type)
            .bind(entity_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
