//! Handlers for article administration.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lyceum_core::article::{
    slug_for_title, validate_excerpt, validate_slug, validate_title, ENTITY_ARTICLE,
};
use lyceum_core::category::validate_sort_order;
use lyceum_core::error::CoreError;
use lyceum_core::hierarchy::ENTITY_CATEGORY;
use lyceum_core::text::{non_blank, validate_cover_image};
use lyceum_core::types::{new_id, DbId};
use lyceum_db::models::article::{Article, CreateArticle, UpdateArticle};
use lyceum_db::repositories::{ArticleRepo, CategoryRepo, NoteRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::CategoryFilter;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Fetch an article or return 404.
pub(crate) async fn ensure_article(pool: &PgPool, id: DbId) -> AppResult<Article> {
    ArticleRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(ENTITY_ARTICLE, id)))
}

async fn ensure_category_exists(pool: &PgPool, id: DbId) -> AppResult<()> {
    CategoryRepo::find_by_id(pool, id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::Core(CoreError::not_found(ENTITY_CATEGORY, id)))
}

/// Reject `slug` if another article already uses it.
async fn ensure_slug_free(pool: &PgPool, slug: &str) -> AppResult<()> {
    if ArticleRepo::find_by_slug(pool, slug).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Slug '{slug}' is already in use"
        ))));
    }
    Ok(())
}

fn validate_optional_fields(
    cover_image: Option<&str>,
    excerpt: Option<&str>,
    sort_order: Option<i32>,
) -> Result<(), CoreError> {
    if let Some(url) = cover_image {
        validate_cover_image(url)?;
    }
    if let Some(excerpt) = excerpt {
        validate_excerpt(excerpt)?;
    }
    if let Some(sort_order) = sort_order {
        validate_sort_order(sort_order)?;
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Article CRUD
-------------------------------------------------------------------------- */

/// GET /admin/articles
pub async fn list_articles(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<CategoryFilter>,
) -> AppResult<impl IntoResponse> {
    let articles = ArticleRepo::list(&state.pool, params.category_id).await?;
    Ok(Json(DataResponse { data: articles }))
}

/// POST /admin/articles
///
/// Create an article. The slug is generated from the title if not provided.
/// Blank optional fields are stored as absent.
pub async fn create_article(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(mut input): Json<CreateArticle>,
) -> AppResult<impl IntoResponse> {
    input.slug = non_blank(input.slug.take());
    input.cover_image = non_blank(input.cover_image.take());
    input.excerpt = non_blank(input.excerpt.take());

    validate_title(&input.title)?;
    validate_optional_fields(
        input.cover_image.as_deref(),
        input.excerpt.as_deref(),
        input.sort_order,
    )?;

    let slug = match &input.slug {
        Some(s) => {
            validate_slug(s)?;
            s.clone()
        }
        None => slug_for_title(&input.title, new_id()),
    };

    ensure_category_exists(&state.pool, input.category_id).await?;
    ensure_slug_free(&state.pool, &slug).await?;

    let article = ArticleRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(
        user_id = %admin.user_id,
        article_id = %article.id,
        slug = %article.slug,
        "Article created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: article })))
}

/// GET /admin/articles/{id}
pub async fn get_article(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let article = ensure_article(&state.pool, id).await?;
    Ok(Json(DataResponse { data: article }))
}

/// PUT /admin/articles/{id}
///
/// Slug uniqueness is only checked when the slug actually changes.
pub async fn update_article(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateArticle>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref title) = input.title {
        validate_title(title)?;
    }
    validate_optional_fields(
        input.cover_image.as_deref(),
        input.excerpt.as_deref(),
        input.sort_order,
    )?;

    let current = ensure_article(&state.pool, id).await?;

    if let Some(category_id) = input.category_id {
        ensure_category_exists(&state.pool, category_id).await?;
    }
    if let Some(ref slug) = input.slug {
        validate_slug(slug)?;
        if *slug != current.slug {
            ensure_slug_free(&state.pool, slug).await?;
        }
    }

    let article = ArticleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(ENTITY_ARTICLE, id)))?;

    tracing::info!(user_id = %admin.user_id, article_id = %id, "Article updated");

    Ok(Json(DataResponse { data: article }))
}

/// DELETE /admin/articles/{id}
///
/// Refused while notes reference the article. Toc entries go with it.
pub async fn delete_article(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_article(&state.pool, id).await?;

    if NoteRepo::count_by_article(&state.pool, id).await? > 0 {
        return Err(AppError::Core(CoreError::PolicyViolation(
            "article has notes; delete them first".into(),
        )));
    }

    if !ArticleRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found(ENTITY_ARTICLE, id)));
    }

    tracing::info!(user_id = %admin.user_id, article_id = %id, "Article deleted");

    Ok(StatusCode::NO_CONTENT)
}
