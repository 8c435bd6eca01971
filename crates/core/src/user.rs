//! Account field validation.

use validator::ValidateEmail;

use crate::error::CoreError;
use crate::roles::VALID_ROLES;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Entity label used in not-found errors.
pub const ENTITY_USER: &str = "user";

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.len() > 64 || !email.to_owned().validate_email() {
        return Err(CoreError::Validation(
            "Email must be a valid address of at most 64 characters".into(),
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    Ok(())
}

pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if !VALID_ROLES.contains(&role) {
        return Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Valid roles: {}",
            VALID_ROLES.join(", ")
        )));
    }
    Ok(())
}
