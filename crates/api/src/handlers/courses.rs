//! Handlers for course administration.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lyceum_core::course::{
    validate_date_range, validate_description, validate_title, CourseStatus, ENTITY_COURSE,
};
use lyceum_core::error::CoreError;
use lyceum_core::hierarchy::ENTITY_CATEGORY;
use lyceum_core::text::{non_blank, validate_cover_image};
use lyceum_core::types::DbId;
use lyceum_db::models::course::{Course, CreateCourse, UpdateCourse};
use lyceum_db::repositories::{CategoryRepo, CourseRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::StatusFilter;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Fetch a course or return 404.
pub(crate) async fn ensure_course(pool: &PgPool, id: DbId) -> AppResult<Course> {
    CourseRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(ENTITY_COURSE, id)))
}

async fn ensure_category_exists(pool: &PgPool, id: DbId) -> AppResult<()> {
    if CategoryRepo::find_by_id(pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::not_found(ENTITY_CATEGORY, id)));
    }
    Ok(())
}

/// Parse an optional `?status=` filter.
pub(crate) fn parse_status_filter(params: &StatusFilter) -> Result<Option<CourseStatus>, CoreError> {
    params.status.as_deref().map(CourseStatus::parse).transpose()
}

/* --------------------------------------------------------------------------
Course CRUD
-------------------------------------------------------------------------- */

/// GET /admin/courses
pub async fn list_courses(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<StatusFilter>,
) -> AppResult<impl IntoResponse> {
    let status = parse_status_filter(&params)?;
    let courses = CourseRepo::list(&state.pool, status).await?;
    Ok(Json(DataResponse { data: courses }))
}

/// POST /admin/courses
pub async fn create_course(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(mut input): Json<CreateCourse>,
) -> AppResult<impl IntoResponse> {
    input.description = non_blank(input.description.take());
    input.cover_image = non_blank(input.cover_image.take());

    validate_title(&input.title)?;
    if let Some(ref description) = input.description {
        validate_description(description)?;
    }
    if let Some(ref url) = input.cover_image {
        validate_cover_image(url)?;
    }
    validate_date_range(input.start_date, input.end_date)?;

    if let Some(category_id) = input.category_id {
        ensure_category_exists(&state.pool, category_id).await?;
    }

    let course = CourseRepo::create(&state.pool, &input).await?;

    tracing::info!(
        user_id = %admin.user_id,
        course_id = %course.id,
        status = %course.status,
        "Course created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: course })))
}

/// GET /admin/courses/{id}
pub async fn get_course(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let course = ensure_course(&state.pool, id).await?;
    Ok(Json(DataResponse { data: course }))
}

/// PUT /admin/courses/{id}
///
/// The date range is checked against the merged result, so moving only one
/// end of the range cannot invert it.
pub async fn update_course(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCourse>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref title) = input.title {
        validate_title(title)?;
    }
    if let Some(ref description) = input.description {
        validate_description(description)?;
    }
    if let Some(ref url) = input.cover_image {
        validate_cover_image(url)?;
    }

    let current = ensure_course(&state.pool, id).await?;
    validate_date_range(
        input.start_date.or(current.start_date),
        input.end_date.or(current.end_date),
    )?;

    if let Some(category_id) = input.category_id {
        ensure_category_exists(&state.pool, category_id).await?;
    }

    let course = CourseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(ENTITY_COURSE, id)))?;

    tracing::info!(user_id = %admin.user_id, course_id = %id, "Course updated");

    Ok(Json(DataResponse { data: course }))
}

/// DELETE /admin/courses/{id}
///
/// Toc entries owned by the course are removed with it.
pub async fn delete_course(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CourseRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found(ENTITY_COURSE, id)));
    }

    tracing::info!(user_id = %admin.user_id, course_id = %id, "Course deleted");

    Ok(StatusCode::NO_CONTENT)
}
