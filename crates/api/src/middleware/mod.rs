//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller, from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- an [`auth::AuthUser`] holding the `admin` role.

pub mod auth;
pub mod rbac;
