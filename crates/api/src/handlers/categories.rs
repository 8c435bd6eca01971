//! Handlers for category administration and the navigation tree.
//!
//! Every mutation goes through the core [`CategoryHierarchy`] so that the
//! placement, re-parent, and delete rules are enforced in one place.
//!
//! [`CategoryHierarchy`]: lyceum_core::hierarchy::CategoryHierarchy

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lyceum_core::category::{CreateCategory, MoveCategory, UpdateCategory};
use lyceum_core::types::DbId;
use lyceum_db::repositories::CategoryRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /categories
///
/// Flat list ordered by level, then sort order.
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::find_all(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /categories/tree
///
/// The materialized navigation forest.
pub async fn get_tree(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tree = state.categories().tree().await?;
    Ok(Json(DataResponse { data: tree }))
}

/// POST /admin/categories
pub async fn create_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    let category = state.categories().insert(&input).await?;

    tracing::info!(
        user_id = %admin.user_id,
        category_id = %category.id,
        parent_id = ?category.parent_id,
        level = category.level,
        "Category created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /admin/categories/{id}
///
/// Title, description, and sort order only; a different `parent_id` is a
/// policy violation.
pub async fn update_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    let category = state.categories().update(id, &input).await?;

    tracing::info!(user_id = %admin.user_id, category_id = %id, "Category updated");

    Ok(Json(DataResponse { data: category }))
}

/// DELETE /admin/categories/{id}
pub async fn delete_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.categories().delete(id).await?;

    tracing::info!(user_id = %admin.user_id, category_id = %id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /admin/categories/{id}/move
///
/// Re-home a category and its subtree.
pub async fn move_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<MoveCategory>,
) -> AppResult<impl IntoResponse> {
    let category = state.categories().move_category(id, input.parent_id).await?;

    tracing::info!(
        user_id = %admin.user_id,
        category_id = %id,
        parent_id = ?input.parent_id,
        level = category.level,
        "Category moved"
    );

    Ok(Json(DataResponse { data: category }))
}
