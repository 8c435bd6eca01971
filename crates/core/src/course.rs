//! Course status lifecycle and field validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::text::{validate_max_len, validate_required};
use crate::types::Timestamp;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Entity label used in not-found errors.
pub const ENTITY_COURSE: &str = "course";

/// Where a course is in its schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    #[default]
    Upcoming,
    Ongoing,
    Completed,
}

impl CourseStatus {
    pub const ALL: [CourseStatus; 3] = [Self::Upcoming, Self::Ongoing, Self::Completed];

    /// Database / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == value)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid course status '{value}'. Valid statuses: upcoming, ongoing, completed"
                ))
            })
    }
}

/// Validate a course title (non-empty, <= 200 chars).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    validate_required("Course title", title, MAX_TITLE_LEN)
}

/// Validate a course description (<= 2000 chars).
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    validate_max_len("Course description", description, MAX_DESCRIPTION_LEN)
}

/// A course may not end before it starts. Open-ended ranges are allowed.
pub fn validate_date_range(
    start: Option<Timestamp>,
    end: Option<Timestamp>,
) -> Result<(), CoreError> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(CoreError::Validation(
                "Start date must not be later than end date".into(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in CourseStatus::ALL {
            assert_eq!(CourseStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_rejected() {
        assert!(CourseStatus::parse("archived").is_err());
        assert!(CourseStatus::parse("Upcoming").is_err());
    }

    #[test]
    fn status_defaults_to_upcoming() {
        assert_eq!(CourseStatus::default(), CourseStatus::Upcoming);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&CourseStatus::Ongoing).unwrap(),
            "\"ongoing\""
        );
    }

    #[test]
    fn date_range() {
        let now = Utc::now();
        let later = now + Duration::days(30);
        assert!(validate_date_range(Some(now), Some(later)).is_ok());
        assert!(validate_date_range(Some(now), Some(now)).is_ok());
        assert!(validate_date_range(Some(later), Some(now)).is_err());
        assert!(validate_date_range(None, Some(now)).is_ok());
        assert!(validate_date_range(Some(now), None).is_ok());
    }

    #[test]
    fn description_limit() {
        assert!(validate_description(&"d".repeat(MAX_DESCRIPTION_LEN)).is_ok());
        assert!(validate_description(&"d".repeat(MAX_DESCRIPTION_LEN + 1)).is_err());
    }
}
