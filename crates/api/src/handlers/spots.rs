//! Handlers for the `/spots` resource.

use axum::extract::State;
use axum::http::StatusCode;
use parkwise_core::types::DbId;
use parkwise_db::ops;

use crate::error::AppResult;
use crate::extract::AppPath;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// DELETE /api/v1/spots/{id}
///
/// Remove one available spot. 409 if it is occupied or is the lot's last.
pub async fn delete_spot(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    ops::delete_spot(&state.pool, &admin.actor(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
