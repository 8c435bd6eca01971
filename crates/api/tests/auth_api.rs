//! HTTP-level tests for login, the current-user endpoint, and role checks.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_user, get, get_auth, post_json, post_json_auth, token_for, TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_success_returns_token_and_user(pool: PgPool) {
    let user = create_user(&pool, "reader@lyceum.test", "reader").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "reader@lyceum.test", "password": TEST_PASSWORD }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["user"]["id"], user.id.to_string());
    assert_eq!(json["user"]["role"], "reader");
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_wrong_password_returns_401(pool: PgPool) {
    create_user(&pool, "reader@lyceum.test", "reader").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "reader@lyceum.test", "password": "not-the-password" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_unknown_email_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "nobody@lyceum.test", "password": TEST_PASSWORD }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_returns_current_user(pool: PgPool) {
    let user = create_user(&pool, "me@lyceum.test", "reader").await;
    let token = token_for(&user);
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/auth/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "me@lyceum.test");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_without_token_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn garbage_token_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/users", "not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reader_cannot_reach_admin_routes(pool: PgPool) {
    let reader = create_user(&pool, "reader@lyceum.test", "reader").await;
    let token = token_for(&reader);
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/admin/users", &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_creates_user_and_duplicate_is_conflict(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let body = json!({ "email": "new@lyceum.test", "password": "long-enough-pw" });

    let response = post_json_auth(app.clone(), "/api/v1/admin/users", body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "reader");

    let response = post_json_auth(app, "/api/v1/admin/users", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_user_validates_input(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let short = json!({ "email": "a@lyceum.test", "password": "short" });
    let response = post_json_auth(app.clone(), "/api/v1/admin/users", short, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bad_role = json!({ "email": "b@lyceum.test", "password": "long-enough-pw", "role": "root" });
    let response = post_json_auth(app.clone(), "/api/v1/admin/users", bad_role, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bad_email = json!({ "email": "not-an-email", "password": "long-enough-pw" });
    let response = post_json_auth(app, "/api/v1/admin/users", bad_email, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
