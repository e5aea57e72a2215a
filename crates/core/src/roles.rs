//! Well-known role name constants.
//!
//! These must match the `ck_users_role` check constraint in
//! `20261001000002_create_users_table.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";
