//! Handlers for user administration.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lyceum_core::error::CoreError;
use lyceum_core::roles::ROLE_READER;
use lyceum_core::user::{validate_email, validate_password, validate_role};
use lyceum_db::models::user::{CreateUser, CreateUserRequest, UserResponse};
use lyceum_db::repositories::UserRepo;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /admin/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let users: Vec<UserResponse> = UserRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok(Json(DataResponse { data: users }))
}

/// POST /admin/users
///
/// Create an account. Role defaults to `reader`.
pub async fn create_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    let email = input.email.trim().to_string();
    validate_email(&email)?;
    validate_password(&input.password)?;
    let role = input.role.unwrap_or_else(|| ROLE_READER.to_string());
    validate_role(&role)?;

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A user with email '{email}' already exists"
        ))));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            password_hash,
            role,
        },
    )
    .await?;

    tracing::info!(
        user_id = %admin.user_id,
        created_user_id = %user.id,
        role = %user.role,
        "User created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(user),
        }),
    ))
}
