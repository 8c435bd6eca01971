//! Small helpers for free-text form fields shared across entities.

use validator::ValidateUrl;

use crate::error::CoreError;

/// Treat a blank optional field as absent. Non-blank values are kept as given.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Require a non-blank value of at most `max` characters.
pub fn validate_required(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    validate_max_len(field, value, max)
}

/// Reject values longer than `max` characters.
pub fn validate_max_len(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Maximum length of a cover image URL.
pub const MAX_COVER_IMAGE_LEN: usize = 500;

/// Validate a cover image reference: an absolute URL of at most 500 chars.
pub fn validate_cover_image(url: &str) -> Result<(), CoreError> {
    validate_max_len("Cover image URL", url, MAX_COVER_IMAGE_LEN)?;
    if !url.to_owned().validate_url() {
        return Err(CoreError::Validation(
            "Cover image must be a valid URL".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_becomes_none() {
        assert_eq!(non_blank(Some("".into())), None);
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("text".into())), Some("text".into()));
    }

    #[test]
    fn required_rejects_blank_and_long() {
        assert!(validate_required("Title", "ok", 5).is_ok());
        assert!(validate_required("Title", " ", 5).is_err());
        assert!(validate_required("Title", "toolong", 5).is_err());
    }

    #[test]
    fn cover_image_must_be_url() {
        assert!(validate_cover_image("https://cdn.example.com/plato.png").is_ok());
        assert!(validate_cover_image("not a url").is_err());
        let long = format!("https://example.com/{}", "a".repeat(MAX_COVER_IMAGE_LEN));
        assert!(validate_cover_image(&long).is_err());
    }
}
