//! Handlers for the `/admin` resource.

use axum::extract::State;
use axum::Json;
use parkwise_db::models::reservation::{Reservation, ReservationListQuery};
use parkwise_db::models::user::{UserListQuery, UserResponse};
use parkwise_db::repositories::{ReservationRepo, UserRepo};

use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/users?search=
///
/// Registered accounts without password hashes. `search` matches usernames
/// case-insensitively.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppQuery(params): AppQuery<UserListQuery>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool, params.search.as_deref()).await?;
    Ok(Json(DataResponse {
        data: users.iter().map(UserResponse::from).collect(),
    }))
}

/// GET /api/v1/admin/reservations?state=open|closed
///
/// Reservations across all users, newest first.
pub async fn list_reservations(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppQuery(params): AppQuery<ReservationListQuery>,
) -> AppResult<Json<DataResponse<Vec<Reservation>>>> {
    let reservations = ReservationRepo::list_all(&state.pool, params.state).await?;
    Ok(Json(DataResponse { data: reservations }))
}
