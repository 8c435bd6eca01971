//! Row adapter for the `categories` table.

use lyceum_core::category::Category;
use lyceum_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `categories` table, converted into the core record.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: DbId,
    pub parent_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub level: i32,
    pub path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            parent_id: row.parent_id,
            title: row.title,
            description: row.description,
            sort_order: row.sort_order,
            level: row.level,
            path: row.path,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
