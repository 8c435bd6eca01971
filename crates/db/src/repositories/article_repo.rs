//! Repository for the `articles` table.

use lyceum_core::toc::ENTITY_TYPE_ARTICLE;
use lyceum_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::article::{Article, CreateArticle, UpdateArticle};
use crate::repositories::TocItemRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, category_id, title, slug, cover_image, excerpt, \
    original, historical, translation, sort_order, created_at, updated_at";

/// Provides CRUD operations for articles.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert a new article with an already validated `slug`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateArticle,
        slug: &str,
    ) -> Result<Article, sqlx::Error> {
        let query = format!(
            "INSERT INTO articles
                (id, category_id, title, slug, cover_image, excerpt,
                 original, historical, translation, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(new_id())
            .bind(input.category_id)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.cover_image)
            .bind(&input.excerpt)
            .bind(&input.original)
            .bind(&input.historical)
            .bind(&input.translation)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE slug = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List articles, optionally restricted to one category.
    pub async fn list(
        pool: &PgPool,
        category_id: Option<DbId>,
    ) -> Result<Vec<Article>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM articles
             WHERE ($1::UUID IS NULL OR category_id = $1)
             ORDER BY sort_order, created_at"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Articles filed under any of `category_ids`.
    pub async fn list_in_categories(
        pool: &PgPool,
        category_ids: &[DbId],
    ) -> Result<Vec<Article>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM articles
             WHERE category_id = ANY($1)
             ORDER BY sort_order, created_at"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(category_ids)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search over title and excerpt.
    pub async fn search(
        pool: &PgPool,
        query_str: &str,
        limit: i64,
    ) -> Result<Vec<Article>, sqlx::Error> {
        let pattern = format!("%{query_str}%");
        let query = format!(
            "SELECT {COLUMNS} FROM articles
             WHERE title ILIKE $1 OR excerpt ILIKE $1
             ORDER BY updated_at DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(&pattern)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update an article. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArticle,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "UPDATE articles SET
                category_id = COALESCE($2, category_id),
                title = COALESCE($3, title),
                slug = COALESCE($4, slug),
                cover_image = COALESCE($5, cover_image),
                excerpt = COALESCE($6, excerpt),
                original = COALESCE($7, original),
                historical = COALESCE($8, historical),
                translation = COALESCE($9, translation),
                sort_order = COALESCE($10, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.cover_image)
            .bind(&input.excerpt)
            .bind(&input.original)
            .bind(&input.historical)
            .bind(&input.translation)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete an article together with its toc entries.
    ///
    /// Returns `true` if the article existed. Notes are not touched; the
    /// foreign key rejects the delete while any remain.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        TocItemRepo::delete_by_entity_inner(&mut tx, ENTITY_TYPE_ARTICLE, id).await?;
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of articles filed under a category.
    pub async fn count_by_category(pool: &PgPool, category_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM articles WHERE category_id = $1")
            .bind(category_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM articles WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }
}
