//! Repository for the `notes` table.

use lyceum_core::toc::ENTITY_TYPE_NOTE;
use lyceum_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::note::{Note, UpdateNote};
use crate::repositories::TocItemRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, article_id, user_id, title, content, created_at, updated_at";

/// Provides CRUD operations for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Insert a new note authored by `user_id`.
    pub async fn create(
        pool: &PgPool,
        article_id: DbId,
        user_id: DbId,
        title: &str,
        content: &str,
    ) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes (id, article_id, user_id, title, content)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(new_id())
            .bind(article_id)
            .bind(user_id)
            .bind(title)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1");
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List notes, optionally restricted to one article, newest first.
    pub async fn list(pool: &PgPool, article_id: Option<DbId>) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes
             WHERE ($1::UUID IS NULL OR article_id = $1)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(article_id)
            .fetch_all(pool)
            .await
    }

    /// Update a note. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNote,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "UPDATE notes SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                article_id = COALESCE($4, article_id),
                user_id = COALESCE($5, user_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.article_id)
            .bind(input.user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a note together with its toc entries.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        TocItemRepo::delete_by_entity_inner(&mut tx, ENTITY_TYPE_NOTE, id).await?;
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of notes attached to an article.
    pub async fn count_by_article(pool: &PgPool, article_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notes WHERE article_id = $1")
            .bind(article_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM notes WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(exists)
    }
}
