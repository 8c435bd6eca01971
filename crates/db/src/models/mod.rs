//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Categories are the exception: their record and DTOs are defined in
//! `lyceum_core::category`, and [`category::CategoryRow`] only adapts rows.

pub mod article;
pub mod category;
pub mod course;
pub mod note;
pub mod toc_item;
pub mod user;
