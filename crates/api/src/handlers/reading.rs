//! Public reading pages.
//!
//! Each handler assembles everything one page of the site needs in a single
//! response, so the frontend never has to stitch several calls together.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use lyceum_core::category::{breadcrumb, descendant_ids, Category};
use lyceum_core::error::CoreError;
use lyceum_core::hierarchy::ENTITY_CATEGORY;
use lyceum_core::toc::TocEntity;
use lyceum_core::tree::{materialize_tree, CategoryNode};
use lyceum_core::types::DbId;
use lyceum_db::models::article::Article;
use lyceum_db::models::course::Course;
use lyceum_db::models::note::Note;
use lyceum_db::models::toc_item::TocItem;
use lyceum_db::repositories::{ArticleRepo, CategoryRepo, CourseRepo, NoteRepo, TocItemRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::articles::ensure_article;
use crate::handlers::courses::{ensure_course, parse_status_filter};
use crate::handlers::notes::ensure_note;
use crate::query::{CategoryPageParams, SearchParams, StatusFilter};
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Page payloads
-------------------------------------------------------------------------- */

#[derive(Debug, Serialize)]
pub struct CategoryPage {
    pub category: Category,
    /// Root first, ending with `category` itself.
    pub breadcrumb: Vec<Category>,
    pub children: Vec<Category>,
    pub articles: Vec<Article>,
    /// Full navigation forest for the sidebar.
    pub tree: Vec<CategoryNode>,
}

#[derive(Debug, Serialize)]
pub struct ArticlePage {
    pub article: Article,
    pub category: Option<Category>,
    pub breadcrumb: Vec<Category>,
    pub toc: Vec<TocItem>,
    pub notes: Vec<Note>,
}

#[derive(Debug, Serialize)]
pub struct CoursePage {
    pub course: Course,
    pub toc: Vec<TocItem>,
}

#[derive(Debug, Serialize)]
pub struct NotePage {
    pub note: Note,
    pub article: Article,
    pub toc: Vec<TocItem>,
}

fn trail(all: &[Category], id: DbId) -> Vec<Category> {
    breadcrumb(all, id).into_iter().cloned().collect()
}

/* --------------------------------------------------------------------------
Handlers
-------------------------------------------------------------------------- */

/// GET /categories/{id}?include_descendants=
pub async fn category_page(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<CategoryPageParams>,
) -> AppResult<impl IntoResponse> {
    let all = CategoryRepo::find_all(&state.pool).await?;
    let category = all
        .iter()
        .find(|c| c.id == id)
        .cloned()
        .ok_or_else(|| AppError::Core(CoreError::not_found(ENTITY_CATEGORY, id)))?;

    let children = CategoryRepo::find_by_parent_id(&state.pool, id).await?;
    let articles = if params.include_descendants {
        ArticleRepo::list_in_categories(&state.pool, &descendant_ids(&all, id)).await?
    } else {
        ArticleRepo::list(&state.pool, Some(id)).await?
    };

    let page = CategoryPage {
        breadcrumb: trail(&all, id),
        tree: materialize_tree(&all),
        category,
        children,
        articles,
    };
    Ok(Json(DataResponse { data: page }))
}

/// GET /articles/search?q=&limit=
pub async fn search_articles(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let q = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest("Query parameter 'q' is required".into()))?;

    let articles = ArticleRepo::search(&state.pool, q, params.limit()).await?;
    Ok(Json(DataResponse { data: articles }))
}

/// GET /articles/{id}
pub async fn article_page(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let article = ensure_article(&state.pool, id).await?;

    let all = CategoryRepo::find_all(&state.pool).await?;
    let category = all.iter().find(|c| c.id == article.category_id).cloned();
    let toc = TocItemRepo::find_by_entity(&state.pool, TocEntity::Article(id)).await?;
    let notes = NoteRepo::list(&state.pool, Some(id)).await?;

    let page = ArticlePage {
        breadcrumb: trail(&all, article.category_id),
        article,
        category,
        toc,
        notes,
    };
    Ok(Json(DataResponse { data: page }))
}

/// GET /courses?status=
pub async fn list_courses(
    State(state): State<AppState>,
    Query(params): Query<StatusFilter>,
) -> AppResult<impl IntoResponse> {
    let status = parse_status_filter(&params)?;
    let courses = CourseRepo::list(&state.pool, status).await?;
    Ok(Json(DataResponse { data: courses }))
}

/// GET /courses/{id}
pub async fn course_page(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let course = ensure_course(&state.pool, id).await?;
    let toc = TocItemRepo::find_by_entity(&state.pool, TocEntity::Course(id)).await?;
    Ok(Json(DataResponse {
        data: CoursePage { course, toc },
    }))
}

/// GET /notes/{id}
pub async fn note_page(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let note = ensure_note(&state.pool, id).await?;
    let article = ensure_article(&state.pool, note.article_id).await?;
    let toc = TocItemRepo::find_by_entity(&state.pool, TocEntity::Note(id)).await?;
    Ok(Json(DataResponse {
        data: NotePage { note, article, toc },
    }))
}
