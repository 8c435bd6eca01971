//! Note entity model and DTOs.

use lyceum_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `notes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Note {
    pub id: DbId,
    pub article_id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new note.
#[derive(Debug, Deserialize)]
pub struct CreateNote {
    pub article_id: DbId,
    /// Author; the requesting user when omitted.
    pub user_id: Option<DbId>,
    pub title: String,
    pub content: String,
}

/// DTO for updating an existing note. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateNote {
    /// Moves the note to another article.
    pub article_id: Option<DbId>,
    /// Reassigns authorship.
    pub user_id: Option<DbId>,
    pub title: Option<String>,
    pub content: Option<String>,
}
