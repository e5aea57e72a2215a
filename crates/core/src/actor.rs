//! Explicit authorization context passed into every core operation.
//!
//! The request layer authenticates the caller and hands the core an
//! [`Actor`]; the core never reads session state of its own.

use crate::error::CoreError;
use crate::roles::{ROLE_ADMIN, ROLE_USER};
use crate::types::DbId;

/// The authenticated caller of a core operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: DbId,
    /// Role name (`"admin"` or `"user"`).
    pub role: String,
}

impl Actor {
    pub fn new(user_id: DbId, role: impl Into<String>) -> Self {
        Self {
            user_id,
            role: role.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Reject the call with `Forbidden` unless the actor is an admin.
    pub fn require_admin(&self) -> Result<(), CoreError> {
        if !self.is_admin() {
            return Err(CoreError::Forbidden("Admin role required".into()));
        }
        Ok(())
    }

    /// Reject the call with `Forbidden` unless the actor holds the `user`
    /// role. Parking is for drivers; admins manage lots but never park.
    pub fn require_user(&self) -> Result<(), CoreError> {
        if self.role != ROLE_USER {
            return Err(CoreError::Forbidden("User role required".into()));
        }
        Ok(())
    }
}
