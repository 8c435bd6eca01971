//! PostgreSQL-backed [`CategoryStore`].

use async_trait::async_trait;
use lyceum_core::category::{Category, CategoryChanges};
use lyceum_core::error::CoreError;
use lyceum_core::hierarchy::{CategoryStore, ENTITY_CATEGORY};
use lyceum_core::types::DbId;
use sqlx::PgPool;

use crate::repositories::{ArticleRepo, CategoryRepo, CourseRepo};

/// Failure of a hierarchy operation run against PostgreSQL.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Category storage over a shared connection pool.
#[derive(Debug, Clone)]
pub struct PgCategoryStore {
    pool: PgPool,
}

impl PgCategoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryStore for PgCategoryStore {
    type Error = StoreError;

    async fn find_all(&self) -> Result<Vec<Category>, StoreError> {
        Ok(CategoryRepo::find_all(&self.pool).await?)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Category>, StoreError> {
        Ok(CategoryRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_by_parent_id(&self, parent_id: DbId) -> Result<Vec<Category>, StoreError> {
        Ok(CategoryRepo::find_by_parent_id(&self.pool, parent_id).await?)
    }

    async fn create(&self, category: &Category) -> Result<Category, StoreError> {
        Ok(CategoryRepo::create(&self.pool, category).await?)
    }

    async fn update(
        &self,
        id: DbId,
        changes: &CategoryChanges,
    ) -> Result<Option<Category>, StoreError> {
        Ok(CategoryRepo::update(&self.pool, id, changes).await?)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(CategoryRepo::delete(&self.pool, id).await?)
    }

    async fn count_articles(&self, category_id: DbId) -> Result<i64, StoreError> {
        Ok(ArticleRepo::count_by_category(&self.pool, category_id).await?)
    }

    async fn count_courses(&self, category_id: DbId) -> Result<i64, StoreError> {
        Ok(CourseRepo::count_by_category(&self.pool, category_id).await?)
    }

    async fn relocate_subtree(
        &self,
        id: DbId,
        new_parent_id: Option<DbId>,
        old_path: &str,
        new_path: &str,
        level_delta: i32,
    ) -> Result<Category, StoreError> {
        CategoryRepo::relocate_subtree(&self.pool, id, new_parent_id, old_path, new_path, level_delta)
            .await?
            .ok_or_else(|| CoreError::not_found(ENTITY_CATEGORY, id).into())
    }
}
