//! Handlers for table-of-contents entries.
//!
//! An entry belongs to exactly one article, note, or course. Anchors are
//! unique within that owner's table of contents.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lyceum_core::category::validate_sort_order;
use lyceum_core::error::CoreError;
use lyceum_core::toc::{
    check_anchor_available, validate_anchor, validate_level, validate_title, TocEntity,
    ENTITY_TOC_ITEM,
};
use lyceum_core::types::DbId;
use lyceum_db::models::toc_item::{CreateTocItem, UpdateTocItem};
use lyceum_db::repositories::TocItemRepo;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::TocOwnerParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Resolve the owner reference and make sure it exists.
async fn resolve_owner(pool: &PgPool, entity_type: &str, entity_id: DbId) -> AppResult<TocEntity> {
    let entity = TocEntity::from_parts(entity_type, entity_id)?;
    if !TocItemRepo::entity_exists(pool, entity).await? {
        return Err(AppError::Core(entity.not_found()));
    }
    Ok(entity)
}

/// Fail with 409 if `anchor` is taken by another entry of `entity`.
async fn ensure_anchor_free(
    pool: &PgPool,
    entity: TocEntity,
    anchor: &str,
    editing: Option<DbId>,
) -> AppResult<()> {
    let siblings = TocItemRepo::find_by_entity(pool, entity).await?;
    check_anchor_available(
        siblings.iter().map(|t| (t.id, t.anchor_id.as_str())),
        anchor,
        editing,
    )?;
    Ok(())
}

/// GET /admin/toc-items?entity_type=&entity_id=
pub async fn list_toc_items(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<TocOwnerParams>,
) -> AppResult<impl IntoResponse> {
    let entity = resolve_owner(&state.pool, &params.entity_type, params.entity_id).await?;
    let items = TocItemRepo::find_by_entity(&state.pool, entity).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /admin/toc-items
pub async fn create_toc_item(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateTocItem>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.title)?;
    validate_anchor(&input.anchor_id)?;
    let level = input.level.unwrap_or(1);
    validate_level(level)?;
    let sort_order = input.sort_order.unwrap_or(0);
    validate_sort_order(sort_order)?;

    let entity = resolve_owner(&state.pool, &input.entity_type, input.entity_id).await?;
    ensure_anchor_free(&state.pool, entity, &input.anchor_id, None).await?;

    let item = TocItemRepo::create(
        &state.pool,
        entity,
        input.title.trim(),
        &input.anchor_id,
        level,
        sort_order,
    )
    .await?;

    tracing::info!(
        user_id = %admin.user_id,
        toc_item_id = %item.id,
        entity_type = entity.entity_type(),
        entity_id = %entity.entity_id(),
        "Toc item created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /admin/toc-items/{id}
pub async fn update_toc_item(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTocItem>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref title) = input.title {
        validate_title(title)?;
    }
    if let Some(level) = input.level {
        validate_level(level)?;
    }
    if let Some(sort_order) = input.sort_order {
        validate_sort_order(sort_order)?;
    }

    let current = TocItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(ENTITY_TOC_ITEM, id)))?;

    if let Some(ref anchor) = input.anchor_id {
        validate_anchor(anchor)?;
        ensure_anchor_free(&state.pool, current.entity()?, anchor, Some(id)).await?;
    }

    let item = TocItemRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(ENTITY_TOC_ITEM, id)))?;

    tracing::info!(user_id = %admin.user_id, toc_item_id = %id, "Toc item updated");

    Ok(Json(DataResponse { data: item }))
}

/// DELETE /admin/toc-items/{id}
pub async fn delete_toc_item(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !TocItemRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found(ENTITY_TOC_ITEM, id)));
    }

    tracing::info!(user_id = %admin.user_id, toc_item_id = %id, "Toc item deleted");

    Ok(StatusCode::NO_CONTENT)
}
