//! Startup tasks that run once before the server accepts connections.

use lyceum_core::roles::ROLE_ADMIN;
use lyceum_core::user::{validate_email, validate_password};
use lyceum_db::models::user::CreateUser;
use lyceum_db::repositories::UserRepo;
use sqlx::PgPool;

use crate::auth::password::hash_password;
use crate::config::AdminSeed;
use crate::error::{AppError, AppResult};

/// Make sure the configured admin account exists.
///
/// Creates it when no user has the seed email. An existing account is left
/// untouched, including its password; a non-admin role is only reported.
/// Returns `true` if a user was created.
pub async fn ensure_admin(pool: &PgPool, seed: &AdminSeed) -> AppResult<bool> {
    let email = seed.email.trim();
    validate_email(email)?;
    validate_password(&seed.password)?;

    if let Some(existing) = UserRepo::find_by_email(pool, email).await? {
        if existing.role != ROLE_ADMIN {
            tracing::warn!(
                user_id = %existing.id,
                role = %existing.role,
                "Seed admin email belongs to a non-admin account"
            );
        }
        return Ok(false);
    }

    let password_hash = hash_password(&seed.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "Seed admin account created");
    Ok(true)
}
