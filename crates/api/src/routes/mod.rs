pub mod admin;
pub mod auth;
pub mod health;
pub mod reading;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                         login (public)
/// /auth/me                            current account (requires auth)
///
/// /categories                         flat list (public)
/// /categories/tree                    navigation forest (public)
/// /categories/{id}                    category page (public)
/// /articles/search                    search by title/excerpt (public)
/// /articles/{id}                      article page (public)
/// /courses                            list, ?status= (public)
/// /courses/{id}                       course page (public)
/// /notes/{id}                         note page (public)
///
/// /admin/categories                   create (admin only)
/// /admin/categories/{id}              update, delete
/// /admin/categories/{id}/move         re-parent a subtree (POST)
/// /admin/articles                     list, create
/// /admin/articles/{id}                get, update, delete
/// /admin/courses                      list, create
/// /admin/courses/{id}                 get, update, delete
/// /admin/notes                        list, create
/// /admin/notes/{id}                   get, update, delete
/// /admin/toc-items                    list (?entity_type=&entity_id=), create
/// /admin/toc-items/{id}               update, delete
/// /admin/users                        list, create
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .merge(reading::router())
}
