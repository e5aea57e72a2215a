//! Startup seeding of the administrator account.

use parkwise_core::roles::ROLE_ADMIN;
use parkwise_db::models::user::CreateUser;
use parkwise_db::repositories::UserRepo;
use parkwise_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::AdminBootstrap;
use crate::error::{AppError, AppResult};

/// Create the configured admin account unless a user with that name exists.
///
/// Returns `true` when an account was created. An existing user is left
/// untouched, whatever its role or password.
pub async fn ensure_admin(pool: &DbPool, admin: &AdminBootstrap) -> AppResult<bool> {
    if let Some(existing) = UserRepo::find_by_username(pool, &admin.username).await? {
        if existing.role != ROLE_ADMIN {
            tracing::warn!(
                username = %existing.username,
                role = %existing.role,
                "Bootstrap admin username belongs to a non-admin account"
            );
        }
        return Ok(false);
    }

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: admin.username.clone(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Bootstrap admin created");
    Ok(true)
}
