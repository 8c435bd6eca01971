//! Repository for the `courses` table.

use lyceum_core::course::CourseStatus;
use lyceum_core::toc::ENTITY_TYPE_COURSE;
use lyceum_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::course::{Course, CreateCourse, UpdateCourse};
use crate::repositories::TocItemRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, cover_image, status, category_id, \
    start_date, end_date, created_at, updated_at";

/// Provides CRUD operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course. A missing status is stored as `upcoming`.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses
                (id, title, description, cover_image, status, category_id, start_date, end_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(new_id())
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.cover_image)
            .bind(input.status.unwrap_or_default().as_str())
            .bind(input.category_id)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List courses, optionally filtered by status, soonest start first.
    pub async fn list(
        pool: &PgPool,
        status: Option<CourseStatus>,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM courses
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY start_date ASC NULLS LAST, created_at DESC"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(status.map(CourseStatus::as_str))
            .fetch_all(pool)
            .await
    }

    /// Update a course. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCourse,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                cover_image = COALESCE($4, cover_image),
                status = COALESCE($5, status),
                category_id = COALESCE($6, category_id),
                start_date = COALESCE($7, start_date),
                end_date = COALESCE($8, end_date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.cover_image)
            .bind(input.status.map(CourseStatus::as_str))
            .bind(input.category_id)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_optional(pool)
            .await
    }

    /// Delete a course together with its toc entries.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        TocItemRepo::delete_by_entity_inner(&mut tx, ENTITY_TYPE_COURSE, id).await?;
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of courses filed under a category.
    pub async fn count_by_category(pool: &PgPool, category_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM courses WHERE category_id = $1")
            .bind(category_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }
}
