//! Integration tests for article, course, note, toc and user repositories.

use lyceum_core::category::CreateCategory;
use lyceum_core::course::CourseStatus;
use lyceum_core::hierarchy::CategoryHierarchy;
use lyceum_core::toc::TocEntity;
use lyceum_core::types::DbId;
use lyceum_db::models::article::{CreateArticle, UpdateArticle};
use lyceum_db::models::course::{CreateCourse, UpdateCourse};
use lyceum_db::models::note::UpdateNote;
use lyceum_db::models::toc_item::UpdateTocItem;
use lyceum_db::models::user::CreateUser;
use lyceum_db::repositories::{ArticleRepo, CourseRepo, NoteRepo, TocItemRepo, UserRepo};
use lyceum_db::PgCategoryStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_category(pool: &PgPool) -> DbId {
    let h = CategoryHierarchy::new(PgCategoryStore::new(pool.clone()));
    h.insert(&CreateCategory {
        title: "Classics".into(),
        description: None,
        parent_id: None,
        sort_order: 0,
    })
    .await
    .unwrap()
    .id
}

fn new_article(category_id: DbId, title: &str) -> CreateArticle {
    CreateArticle {
        category_id,
        title: title.to_string(),
        slug: None,
        cover_image: None,
        excerpt: Some(format!("An excerpt about {title}")),
        original: Some("原文".into()),
        historical: None,
        translation: None,
        sort_order: None,
    }
}

async fn seed_user(pool: &PgPool, email: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "not-a-real-hash".into(),
            role: "reader".into(),
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Articles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_article_crud(pool: PgPool) {
    let category_id = seed_category(&pool).await;
    let article = ArticleRepo::create(&pool, &new_article(category_id, "Apology"), "apology")
        .await
        .unwrap();
    assert_eq!(article.sort_order, 0);
    assert_eq!(article.slug, "apology");

    let by_slug = ArticleRepo::find_by_slug(&pool, "apology").await.unwrap().unwrap();
    assert_eq!(by_slug.id, article.id);

    let update = UpdateArticle {
        title: Some("The Apology".into()),
        ..Default::default()
    };
    let updated = ArticleRepo::update(&pool, article.id, &update).await.unwrap().unwrap();
    assert_eq!(updated.title, "The Apology");
    assert_eq!(updated.slug, "apology");
    assert_eq!(updated.original.as_deref(), Some("原文"));

    assert_eq!(ArticleRepo::count_by_category(&pool, category_id).await.unwrap(), 1);
    assert_eq!(ArticleRepo::list(&pool, Some(category_id)).await.unwrap().len(), 1);

    assert!(ArticleRepo::delete(&pool, article.id).await.unwrap());
    assert!(!ArticleRepo::delete(&pool, article.id).await.unwrap());
    assert!(ArticleRepo::find_by_id(&pool, article.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_article_update_missing_returns_none(pool: PgPool) {
    let result = ArticleRepo::update(&pool, uuid::Uuid::new_v4(), &UpdateArticle::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_slug_violates_unique_constraint(pool: PgPool) {
    let category_id = seed_category(&pool).await;
    ArticleRepo::create(&pool, &new_article(category_id, "Meno"), "meno")
        .await
        .unwrap();

    let err = ArticleRepo::create(&pool, &new_article(category_id, "Meno again"), "meno")
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_articles_slug"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_article_search_matches_title_and_excerpt(pool: PgPool) {
    let category_id = seed_category(&pool).await;
    ArticleRepo::create(&pool, &new_article(category_id, "Phaedo"), "phaedo")
        .await
        .unwrap();
    ArticleRepo::create(&pool, &new_article(category_id, "Crito"), "crito")
        .await
        .unwrap();

    let hits = ArticleRepo::search(&pool, "phae", 20).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].slug, "phaedo");

    let by_excerpt = ArticleRepo::search(&pool, "excerpt about", 20).await.unwrap();
    assert_eq!(by_excerpt.len(), 2);
}

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_course_crud_and_status_filter(pool: PgPool) {
    let input = CreateCourse {
        title: "Intro to Logic".into(),
        description: None,
        cover_image: None,
        status: None,
        category_id: None,
        start_date: None,
        end_date: None,
    };
    let course = CourseRepo::create(&pool, &input).await.unwrap();
    assert_eq!(course.status, "upcoming");

    let update = UpdateCourse {
        status: Some(CourseStatus::Ongoing),
        ..Default::default()
    };
    let updated = CourseRepo::update(&pool, course.id, &update).await.unwrap().unwrap();
    assert_eq!(updated.status, "ongoing");

    assert_eq!(CourseRepo::list(&pool, Some(CourseStatus::Ongoing)).await.unwrap().len(), 1);
    assert!(CourseRepo::list(&pool, Some(CourseStatus::Completed)).await.unwrap().is_empty());
    assert_eq!(CourseRepo::list(&pool, None).await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_note_blocks_article_delete(pool: PgPool) {
    let category_id = seed_category(&pool).await;
    let user_id = seed_user(&pool, "reader@example.com").await;
    let article = ArticleRepo::create(&pool, &new_article(category_id, "Republic"), "republic")
        .await
        .unwrap();
    let note = NoteRepo::create(&pool, article.id, user_id, "Cave", "Shadows on the wall")
        .await
        .unwrap();

    assert_eq!(NoteRepo::count_by_article(&pool, article.id).await.unwrap(), 1);
    let err = ArticleRepo::delete(&pool, article.id).await.unwrap_err();
    assert_eq!(
        err.as_database_error().and_then(|e| e.code()).as_deref(),
        Some("23503")
    );

    let updated = NoteRepo::update(
        &pool,
        note.id,
        &UpdateNote {
            content: Some("The divided line".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.title, "Cave");
    assert_eq!(updated.content, "The divided line");

    assert!(NoteRepo::delete(&pool, note.id).await.unwrap());
    assert!(ArticleRepo::delete(&pool, article.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Toc items
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toc_items_ordered_and_removed_with_owner(pool: PgPool) {
    let category_id = seed_category(&pool).await;
    let article = ArticleRepo::create(&pool, &new_article(category_id, "Ethics"), "ethics")
        .await
        .unwrap();
    let entity = TocEntity::Article(article.id);

    TocItemRepo::create(&pool, entity, "Book II", "book-2", 1, 2).await.unwrap();
    TocItemRepo::create(&pool, entity, "Book I", "book-1", 1, 1).await.unwrap();

    let toc = TocItemRepo::find_by_entity(&pool, entity).await.unwrap();
    let anchors: Vec<_> = toc.iter().map(|t| t.anchor_id.as_str()).collect();
    assert_eq!(anchors, ["book-1", "book-2"]);
    assert_eq!(toc[0].entity().unwrap(), entity);

    assert!(ArticleRepo::delete(&pool, article.id).await.unwrap());
    assert!(TocItemRepo::find_by_entity(&pool, entity).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toc_anchor_unique_per_entity(pool: PgPool) {
    let course = CourseRepo::create(
        &pool,
        &CreateCourse {
            title: "Zhuangzi".into(),
            description: None,
            cover_image: None,
            status: None,
            category_id: None,
            start_date: None,
            end_date: None,
        },
    )
    .await
    .unwrap();
    let entity = TocEntity::Course(course.id);
    let other = TocEntity::Course(uuid::Uuid::new_v4());

    TocItemRepo::create(&pool, entity, "Week 1", "week-1", 1, 0).await.unwrap();
    TocItemRepo::create(&pool, other, "Week 1", "week-1", 1, 0).await.unwrap();

    let err = TocItemRepo::create(&pool, entity, "Again", "week-1", 1, 1)
        .await
        .unwrap_err();
    assert_eq!(
        err.as_database_error().and_then(|e| e.constraint()),
        Some("uq_toc_items_entity_anchor")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toc_entity_exists_dispatches_per_variant(pool: PgPool) {
    let category_id = seed_category(&pool).await;
    let article = ArticleRepo::create(&pool, &new_article(category_id, "Laws"), "laws")
        .await
        .unwrap();

    assert!(TocItemRepo::entity_exists(&pool, TocEntity::Article(article.id)).await.unwrap());
    assert!(!TocItemRepo::entity_exists(&pool, TocEntity::Course(article.id)).await.unwrap());
    assert!(!TocItemRepo::entity_exists(&pool, TocEntity::Note(article.id)).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toc_update(pool: PgPool) {
    let entity = TocEntity::Note(uuid::Uuid::new_v4());
    let item = TocItemRepo::create(&pool, entity, "Intro", "intro", 1, 0).await.unwrap();

    let updated = TocItemRepo::update(
        &pool,
        item.id,
        &UpdateTocItem {
            level: Some(2),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.level, 2);
    assert_eq!(updated.anchor_id, "intro");

    assert!(TocItemRepo::delete(&pool, item.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_email_unique(pool: PgPool) {
    seed_user(&pool, "dup@example.com").await;
    let err = UserRepo::create(
        &pool,
        &CreateUser {
            email: "dup@example.com".into(),
            password_hash: "x".into(),
            role: "reader".into(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(
        err.as_database_error().and_then(|e| e.constraint()),
        Some("uq_users_email")
    );
    assert_eq!(UserRepo::count_by_role(&pool, "reader").await.unwrap(), 1);
}
