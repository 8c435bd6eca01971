//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role` in
//! `20260301000005_create_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_READER: &str = "reader";

/// All assignable roles.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_READER];
