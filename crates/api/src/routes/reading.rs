//! Public, unauthenticated reading routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::{categories, reading};
use crate::state::AppState;

/// Routes merged at the `/api/v1` root.
///
/// ```text
/// GET /categories          -> list_categories
/// GET /categories/tree     -> get_tree
/// GET /categories/{id}     -> category_page
/// GET /articles/search     -> search_articles
/// GET /articles/{id}       -> article_page
/// GET /courses             -> list_courses
/// GET /courses/{id}        -> course_page
/// GET /notes/{id}          -> note_page
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(categories::list_categories))
        .route("/categories/tree", get(categories::get_tree))
        .route("/categories/{id}", get(reading::category_page))
        .route("/articles/search", get(reading::search_articles))
        .route("/articles/{id}", get(reading::article_page))
        .route("/courses", get(reading::list_courses))
        .route("/courses/{id}", get(reading::course_page))
        .route("/notes/{id}", get(reading::note_page))
}
