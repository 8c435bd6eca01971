//! Shared query parameter types for API handlers.

use lyceum_core::types::DbId;
use serde::Deserialize;

/// Default number of search hits returned.
pub const DEFAULT_SEARCH_LIMIT: i64 = 20;

/// Upper bound on search hits.
pub const MAX_SEARCH_LIMIT: i64 = 100;

/// `?q=&limit=` for article search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<i64>,
}

impl SearchParams {
    /// The requested limit clamped to `1..=MAX_SEARCH_LIMIT`.
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .clamp(1, MAX_SEARCH_LIMIT)
    }
}

/// `?category_id=` filter for article listings.
#[derive(Debug, Deserialize)]
pub struct CategoryFilter {
    pub category_id: Option<DbId>,
}

/// `?status=` filter for course listings.
#[derive(Debug, Deserialize)]
pub struct StatusFilter {
    pub status: Option<String>,
}

/// `?article_id=` filter for note listings.
#[derive(Debug, Deserialize)]
pub struct ArticleFilter {
    pub article_id: Option<DbId>,
}

/// `?entity_type=&entity_id=` selecting one table of contents.
#[derive(Debug, Deserialize)]
pub struct TocOwnerParams {
    pub entity_type: String,
    pub entity_id: DbId,
}

/// `?include_descendants=` for the category page.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryPageParams {
    /// Also list articles filed under every subcategory.
    #[serde(default)]
    pub include_descendants: bool,
}
