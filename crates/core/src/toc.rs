//! Table-of-contents entries and the entity they belong to.
//!
//! A toc item belongs to exactly one article, note, or course. The owner is
//! stored as an `(entity_type, entity_id)` pair; in Rust it is the tagged
//! union [`TocEntity`], so code that needs to find the owner matches on the
//! variant instead of comparing strings.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::article::ENTITY_ARTICLE;
use crate::course::ENTITY_COURSE;
use crate::error::CoreError;
use crate::note::ENTITY_NOTE;
use crate::text::{validate_max_len, validate_required};
use crate::types::DbId;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_ANCHOR_LEN: usize = 200;

/// Entity label used in not-found errors.
pub const ENTITY_TOC_ITEM: &str = "toc item";

pub const ENTITY_TYPE_ARTICLE: &str = "article";
pub const ENTITY_TYPE_NOTE: &str = "note";
pub const ENTITY_TYPE_COURSE: &str = "course";

/// All valid `entity_type` values.
pub const VALID_ENTITY_TYPES: &[&str] = &[ENTITY_TYPE_ARTICLE, ENTITY_TYPE_NOTE, ENTITY_TYPE_COURSE];

static ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex"));

/// The owner of a toc item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "entity_type", content = "entity_id", rename_all = "lowercase")]
pub enum TocEntity {
    Article(DbId),
    Note(DbId),
    Course(DbId),
}

impl TocEntity {
    /// Rebuild the owner from its stored `(entity_type, entity_id)` columns.
    pub fn from_parts(entity_type: &str, entity_id: DbId) -> Result<Self, CoreError> {
        match entity_type {
            ENTITY_TYPE_ARTICLE => Ok(Self::Article(entity_id)),
            ENTITY_TYPE_NOTE => Ok(Self::Note(entity_id)),
            ENTITY_TYPE_COURSE => Ok(Self::Course(entity_id)),
            other => Err(CoreError::Validation(format!(
                "Invalid entity type '{other}'. Valid types: {}",
                VALID_ENTITY_TYPES.join(", ")
            ))),
        }
    }

    pub fn entity_type(self) -> &'static str {
        match self {
            Self::Article(_) => ENTITY_TYPE_ARTICLE,
            Self::Note(_) => ENTITY_TYPE_NOTE,
            Self::Course(_) => ENTITY_TYPE_COURSE,
        }
    }

    pub fn entity_id(self) -> DbId {
        match self {
            Self::Article(id) | Self::Note(id) | Self::Course(id) => id,
        }
    }

    /// Not-found error for an owner that does not exist.
    pub fn not_found(self) -> CoreError {
        let entity = match self {
            Self::Article(_) => ENTITY_ARTICLE,
            Self::Note(_) => ENTITY_NOTE,
            Self::Course(_) => ENTITY_COURSE,
        };
        CoreError::not_found(entity, self.entity_id())
    }
}

/// Validate a toc entry title (non-empty, <= 200 chars).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    validate_required("Toc title", title, MAX_TITLE_LEN)
}

/// Validate an anchor id usable as a same-page fragment.
pub fn validate_anchor(anchor: &str) -> Result<(), CoreError> {
    if anchor.is_empty() {
        return Err(CoreError::Validation("Anchor must not be empty".into()));
    }
    validate_max_len("Anchor", anchor, MAX_ANCHOR_LEN)?;
    if !ANCHOR_RE.is_match(anchor) {
        return Err(CoreError::Validation(
            "Anchor may contain only letters, digits, hyphens, and underscores".into(),
        ));
    }
    Ok(())
}

/// Indentation level; 1 is the outermost.
pub fn validate_level(level: i32) -> Result<(), CoreError> {
    if level < 1 {
        return Err(CoreError::Validation("Toc level must be at least 1".into()));
    }
    Ok(())
}

/// Fail with `Conflict` if `anchor` is already used by another entry of the
/// same owner. `editing` is the id of the entry being updated, if any.
pub fn check_anchor_available<'a>(
    taken: impl IntoIterator<Item = (DbId, &'a str)>,
    anchor: &str,
    editing: Option<DbId>,
) -> Result<(), CoreError> {
    let clash = taken
        .into_iter()
        .any(|(id, existing)| existing == anchor && Some(id) != editing);
    if clash {
        return Err(CoreError::Conflict(format!(
            "Anchor '{anchor}' is already used in this table of contents"
        )));
    }
    Ok(())
}
