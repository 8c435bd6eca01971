//! Table-of-contents entry model and DTOs.

use lyceum_core::error::CoreError;
use lyceum_core::toc::TocEntity;
use lyceum_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `toc_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TocItem {
    pub id: DbId,
    pub entity_type: String,
    pub entity_id: DbId,
    pub title: String,
    pub anchor_id: String,
    pub level: i32,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TocItem {
    /// The owning article, note, or course.
    pub fn entity(&self) -> Result<TocEntity, CoreError> {
        TocEntity::from_parts(&self.entity_type, self.entity_id)
    }
}

/// DTO for creating a toc entry.
#[derive(Debug, Deserialize)]
pub struct CreateTocItem {
    pub entity_type: String,
    pub entity_id: DbId,
    pub title: String,
    pub anchor_id: String,
    /// Defaults to 1.
    pub level: Option<i32>,
    pub sort_order: Option<i32>,
}

/// DTO for updating a toc entry. The owner cannot change.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTocItem {
    pub title: Option<String>,
    pub anchor_id: Option<String>,
    pub level: Option<i32>,
    pub sort_order: Option<i32>,
}
