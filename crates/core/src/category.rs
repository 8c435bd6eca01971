//! Category records, input DTOs, validation, and hierarchy placement.
//!
//! A category's `level` and `path` are denormalized from its ancestor chain
//! and computed once, when the category is placed under its parent. The
//! helpers here derive them and answer ancestor/descendant questions over a
//! flat list without touching storage.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Maximum length of a category title.
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum length of a category description.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Separator between ids in a materialized path.
pub const PATH_SEPARATOR: char = '/';

/// A node of the category hierarchy as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: DbId,
    /// `None` for roots.
    pub parent_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub sort_order: i32,
    /// Number of ancestors.
    pub level: i32,
    /// `/`-joined ids from the root down to this node. Rows created before
    /// paths were tracked have none.
    pub path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub title: String,
    pub description: Option<String>,
    pub parent_id: Option<DbId>,
    #[serde(default)]
    pub sort_order: i32,
}

/// DTO for updating a category. All fields are optional.
///
/// `parent_id` distinguishes "not supplied" (`None`) from an explicit
/// `null` (`Some(None)`) so that an attempt to detach a child is seen and
/// rejected like any other re-parent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategory {
    pub title: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub parent_id: Option<Option<DbId>>,
}

/// The subset of an update that is written to storage. Hierarchy fields are
/// never written by an update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
}

impl From<&UpdateCategory> for CategoryChanges {
    fn from(input: &UpdateCategory) -> Self {
        Self {
            title: input.title.clone(),
            description: input.description.clone(),
            sort_order: input.sort_order,
        }
    }
}

/// Request body for moving a category (and its subtree) under a new parent.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveCategory {
    /// `None` moves the subtree to the top level.
    pub parent_id: Option<DbId>,
}

fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a category title (non-empty, <= 100 chars).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation(
            "Category title must not be empty".into(),
        ));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Category title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a category description (<= 500 chars).
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(CoreError::Validation(format!(
            "Category description must be at most {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a sort weight. Shared by every entity with a `sort_order`.
pub fn validate_sort_order(sort_order: i32) -> Result<(), CoreError> {
    if sort_order < 0 {
        return Err(CoreError::Validation(
            "Sort order must not be negative".into(),
        ));
    }
    Ok(())
}

impl CreateCategory {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_title(&self.title)?;
        if let Some(ref description) = self.description {
            validate_description(description)?;
        }
        validate_sort_order(self.sort_order)
    }
}

impl UpdateCategory {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(ref title) = self.title {
            validate_title(title)?;
        }
        if let Some(ref description) = self.description {
            validate_description(description)?;
        }
        if let Some(sort_order) = self.sort_order {
            validate_sort_order(sort_order)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// Denormalized hierarchy position of a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub level: i32,
    pub path: String,
}

/// Compute `level` and `path` for category `id` placed under `parent`.
///
/// A parent without a stored path contributes its own id as the prefix.
pub fn placement_for(id: DbId, parent: Option<&Category>) -> Placement {
    match parent {
        None => Placement {
            level: 0,
            path: id.to_string(),
        },
        Some(parent) => Placement {
            level: parent.level + 1,
            path: format!("{}{PATH_SEPARATOR}{id}", effective_path(parent)),
        },
    }
}

/// The category's stored path, or its bare id when no path was recorded.
pub fn effective_path(category: &Category) -> String {
    category
        .path
        .clone()
        .unwrap_or_else(|| category.id.to_string())
}

/// Navigation link for a category page.
pub fn category_href(id: DbId) -> String {
    format!("/category/{id}")
}

// ---------------------------------------------------------------------------
// Flat-list queries
// ---------------------------------------------------------------------------

/// Ancestor chain of `id`, root first and the category itself last.
///
/// Empty when `id` is not in `categories`. Stops at the first missing parent
/// or repeated id, so corrupt data yields a truncated chain instead of a loop.
pub fn breadcrumb(categories: &[Category], id: DbId) -> Vec<&Category> {
    let by_id: HashMap<DbId, &Category> = categories.iter().map(|c| (c.id, c)).collect();
    let mut chain = Vec::new();
    let mut seen = HashSet::new();
    let mut current = by_id.get(&id).copied();

    while let Some(category) = current {
        if !seen.insert(category.id) {
            break;
        }
        chain.push(category);
        current = category.parent_id.and_then(|pid| by_id.get(&pid).copied());
    }

    chain.reverse();
    chain
}

/// Ids of `id` and every category below it, in input order.
///
/// Uses the materialized path prefix when the category has one. Rows without
/// a path fall back to walking parent links.
pub fn descendant_ids(categories: &[Category], id: DbId) -> Vec<DbId> {
    let Some(root) = categories.iter().find(|c| c.id == id) else {
        return Vec::new();
    };

    if let Some(ref path) = root.path {
        let prefix = format!("{path}{PATH_SEPARATOR}");
        return categories
            .iter()
            .filter(|c| c.id == id || c.path.as_deref().is_some_and(|p| p.starts_with(&prefix)))
            .map(|c| c.id)
            .collect();
    }

    let mut found: HashSet<DbId> = HashSet::from([id]);
    let mut frontier = vec![id];
    while let Some(parent) = frontier.pop() {
        for child in categories.iter().filter(|c| c.parent_id == Some(parent)) {
            if found.insert(child.id) {
                frontier.push(child.id);
            }
        }
    }

    categories
        .iter()
        .filter(|c| found.contains(&c.id))
        .map(|c| c.id)
        .collect()
}
