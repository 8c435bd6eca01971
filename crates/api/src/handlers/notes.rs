//! Handlers for note administration.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lyceum_core::article::ENTITY_ARTICLE;
use lyceum_core::error::CoreError;
use lyceum_core::note::{validate_content, validate_title, ENTITY_NOTE};
use lyceum_core::types::DbId;
use lyceum_core::user::ENTITY_USER;
use lyceum_db::models::note::{CreateNote, Note, UpdateNote};
use lyceum_db::repositories::{ArticleRepo, NoteRepo, UserRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ArticleFilter;
use crate::response::DataResponse;
use crate::state::AppState;

/// Fetch a note or return 404.
pub(crate) async fn ensure_note(pool: &PgPool, id: DbId) -> AppResult<Note> {
    NoteRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(ENTITY_NOTE, id)))
}

/// GET /admin/notes
pub async fn list_notes(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ArticleFilter>,
) -> AppResult<impl IntoResponse> {
    let notes = NoteRepo::list(&state.pool, params.article_id).await?;
    Ok(Json(DataResponse { data: notes }))
}

/// POST /admin/notes
///
/// The note is attributed to `user_id`, or to the caller when omitted.
pub async fn create_note(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateNote>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.title)?;
    validate_content(&input.content)?;

    if !ArticleRepo::exists(&state.pool, input.article_id).await? {
        return Err(AppError::Core(CoreError::not_found(
            ENTITY_ARTICLE,
            input.article_id,
        )));
    }

    let user_id = input.user_id.unwrap_or(admin.user_id);
    if !UserRepo::exists(&state.pool, user_id).await? {
        return Err(AppError::Core(CoreError::not_found(ENTITY_USER, user_id)));
    }

    let note = NoteRepo::create(
        &state.pool,
        input.article_id,
        user_id,
        input.title.trim(),
        &input.content,
    )
    .await?;

    tracing::info!(
        user_id = %admin.user_id,
        note_id = %note.id,
        article_id = %note.article_id,
        "Note created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: note })))
}

/// GET /admin/notes/{id}
pub async fn get_note(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let note = ensure_note(&state.pool, id).await?;
    Ok(Json(DataResponse { data: note }))
}

/// PUT /admin/notes/{id}
///
/// `article_id` and `user_id` reassign the note; both must exist.
pub async fn update_note(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNote>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref title) = input.title {
        validate_title(title)?;
    }
    if let Some(ref content) = input.content {
        validate_content(content)?;
    }

    ensure_note(&state.pool, id).await?;
    if let Some(article_id) = input.article_id {
        if !ArticleRepo::exists(&state.pool, article_id).await? {
            return Err(AppError::Core(CoreError::not_found(ENTITY_ARTICLE, article_id)));
        }
    }
    if let Some(user_id) = input.user_id {
        if !UserRepo::exists(&state.pool, user_id).await? {
            return Err(AppError::Core(CoreError::not_found(ENTITY_USER, user_id)));
        }
    }

    let note = NoteRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(ENTITY_NOTE, id)))?;

    tracing::info!(user_id = %admin.user_id, note_id = %id, "Note updated");

    Ok(Json(DataResponse { data: note }))
}

/// DELETE /admin/notes/{id}
pub async fn delete_note(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !NoteRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found(ENTITY_NOTE, id)));
    }

    tracing::info!(user_id = %admin.user_id, note_id = %id, "Note deleted");

    Ok(StatusCode::NO_CONTENT)
}
