//! Article entity model and DTOs.

use lyceum_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `articles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    pub id: DbId,
    pub category_id: DbId,
    pub title: String,
    pub slug: String,
    pub cover_image: Option<String>,
    pub excerpt: Option<String>,
    /// Source text.
    pub original: Option<String>,
    /// Historical background.
    pub historical: Option<String>,
    pub translation: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new article.
#[derive(Debug, Deserialize)]
pub struct CreateArticle {
    pub category_id: DbId,
    pub title: String,
    /// Auto-generated from title if `None`.
    pub slug: Option<String>,
    pub cover_image: Option<String>,
    pub excerpt: Option<String>,
    pub original: Option<String>,
    pub historical: Option<String>,
    pub translation: Option<String>,
    pub sort_order: Option<i32>,
}

/// DTO for updating an existing article. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateArticle {
    pub category_id: Option<DbId>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub cover_image: Option<String>,
    pub excerpt: Option<String>,
    pub original: Option<String>,
    pub historical: Option<String>,
    pub translation: Option<String>,
    pub sort_order: Option<i32>,
}
