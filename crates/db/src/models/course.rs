//! Course entity model and DTOs.

use lyceum_core::course::CourseStatus;
use lyceum_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `courses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    /// One of `upcoming`, `ongoing`, `completed`.
    pub status: String,
    pub category_id: Option<DbId>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new course.
#[derive(Debug, Deserialize)]
pub struct CreateCourse {
    pub title: String,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    /// Defaults to `upcoming`.
    pub status: Option<CourseStatus>,
    pub category_id: Option<DbId>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
}

/// DTO for updating an existing course. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCourse {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub status: Option<CourseStatus>,
    pub category_id: Option<DbId>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
}
