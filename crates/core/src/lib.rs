//! Lyceum domain core.
//!
//! Pure domain logic with no I/O: entity validation, the category hierarchy
//! manager and its storage seam, navigation tree materialization, and the
//! table-of-contents entity tagging. Both the repository layer and the HTTP
//! server build on this crate.

pub mod article;
pub mod category;
pub mod course;
pub mod error;
pub mod hierarchy;
pub mod note;
pub mod roles;
pub mod text;
pub mod toc;
pub mod tree;
pub mod types;
pub mod user;
