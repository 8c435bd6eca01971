//! Route definitions for the `/admin` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{articles, categories, courses, notes, toc_items, users};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `admin` role (enforced by handler extractors).
pub fn router() -> Router<AppState> {
    Router::new()
        // Categories
        .route("/categories", post(categories::create_category))
        .route(
            "/categories/{id}",
            put(categories::update_category).delete(categories::delete_category),
        )
        .route("/categories/{id}/move", post(categories::move_category))
        // Articles
        .route(
            "/articles",
            get(articles::list_articles).post(articles::create_article),
        )
        .route(
            "/articles/{id}",
            get(articles::get_article)
                .put(articles::update_article)
                .delete(articles::delete_article),
        )
        // Courses
        .route(
            "/courses",
            get(courses::list_courses).post(courses::create_course),
        )
        .route(
            "/courses/{id}",
            get(courses::get_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
        )
        // Notes
        .route("/notes", get(notes::list_notes).post(notes::create_note))
        .route(
            "/notes/{id}",
            get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
        // Table of contents
        .route(
            "/toc-items",
            get(toc_items::list_toc_items).post(toc_items::create_toc_item),
        )
        .route(
            "/toc-items/{id}",
            put(toc_items::update_toc_item).delete(toc_items::delete_toc_item),
        )
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
}
