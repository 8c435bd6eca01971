//! Article field validation and slug handling.
//!
//! Articles hold three parallel bodies of text (the original, its historical
//! context, and a translation) and are filed under exactly one category.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::text::{validate_max_len, validate_required};
use crate::types::DbId;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_SLUG_LEN: usize = 200;
pub const MAX_EXCERPT_LEN: usize = 1000;

/// Entity label used in not-found errors.
pub const ENTITY_ARTICLE: &str = "article";

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("valid regex"));

/// Validate an article title (non-empty, <= 200 chars).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    validate_required("Article title", title, MAX_TITLE_LEN)
}

/// Validate a slug: lowercase ASCII letters, digits, and hyphens only.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".into()));
    }
    validate_max_len("Slug", slug, MAX_SLUG_LEN)?;
    if !SLUG_RE.is_match(slug) {
        return Err(CoreError::Validation(
            "Slug must contain only lowercase letters, digits, and hyphens".into(),
        ));
    }
    Ok(())
}

/// Validate an excerpt (<= 1000 chars).
pub fn validate_excerpt(excerpt: &str) -> Result<(), CoreError> {
    validate_max_len("Excerpt", excerpt, MAX_EXCERPT_LEN)
}

/// Derive a URL-safe slug from a title.
///
/// Lowercases ASCII, turns every other character into a hyphen, collapses
/// runs of hyphens, and trims them from both ends. Titles with no ASCII
/// alphanumerics yield an empty slug, which [`validate_slug`] rejects.
pub fn generate_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut prev_hyphen = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }
    slug.trim_matches('-').to_string()
}

/// Slug for a title that [`generate_slug`] cannot romanize: `article-`
/// followed by the first eight hex digits of `seed`.
pub fn fallback_slug(seed: DbId) -> String {
    let hex = seed.simple().to_string();
    format!("article-{}", &hex[..8])
}

/// Slug derived from `title`, or a [`fallback_slug`] when nothing usable
/// remains after romanization.
pub fn slug_for_title(title: &str, seed: DbId) -> String {
    let slug = generate_slug(title);
    if slug.is_empty() {
        fallback_slug(seed)
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_from_title() {
        assert_eq!(generate_slug("The Great Learning"), "the-great-learning");
        assert_eq!(generate_slug("Meno (Part 2)"), "meno-part-2");
        assert_eq!(generate_slug("--Apology--"), "apology");
    }

    #[test]
    fn slug_from_non_ascii_title_is_empty() {
        assert_eq!(generate_slug("大学"), "");
        assert!(validate_slug(&generate_slug("大学")).is_err());
    }

    #[test]
    fn non_ascii_title_gets_valid_fallback() {
        let seed = crate::types::new_id();
        let slug = slug_for_title("大学", seed);
        assert!(slug.starts_with("article-"));
        assert_eq!(slug.len(), "article-".len() + 8);
        assert!(validate_slug(&slug).is_ok());
        assert_eq!(slug_for_title("Great Learning", seed), "great-learning");
    }

    #[test]
    fn slug_validation() {
        assert!(validate_slug("da-xue-01").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Upper").is_err());
        assert!(validate_slug("under_score").is_err());
        assert!(validate_slug(&"a".repeat(MAX_SLUG_LEN + 1)).is_err());
    }

    #[test]
    fn title_validation() {
        assert!(validate_title("Apology").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LEN + 1)).is_err());
    }

    #[test]
    fn excerpt_validation() {
        assert!(validate_excerpt(&"x".repeat(MAX_EXCERPT_LEN)).is_ok());
        assert!(validate_excerpt(&"x".repeat(MAX_EXCERPT_LEN + 1)).is_err());
    }
}
