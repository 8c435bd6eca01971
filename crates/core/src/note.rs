//! Study note validation.

use crate::error::CoreError;
use crate::text::validate_required;

pub const MAX_TITLE_LEN: usize = 200;

/// Entity label used in not-found errors.
pub const ENTITY_NOTE: &str = "note";

/// Validate a note title (non-empty, <= 200 chars).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    validate_required("Note title", title, MAX_TITLE_LEN)
}

/// Note content must not be blank.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation(
            "Note content must not be empty".into(),
        ));
    }
    Ok(())
}
