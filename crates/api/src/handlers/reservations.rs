//! Handlers for reservations: allocate, release, and the caller's history.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use parkwise_core::reservation::ReservationState;
use parkwise_core::types::DbId;
use parkwise_db::models::reservation::{Reservation, ReservationListQuery, ReleaseReceipt};
use parkwise_db::ops;
use parkwise_db::repositories::ReservationRepo;

use crate::error::AppResult;
use crate::extract::{AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/lots/{id}/reservations
///
/// Take the first free spot in the lot. 409 `NO_AVAILABLE_SPOT` when full.
pub async fn allocate(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(lot_id): AppPath<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<Reservation>>)> {
    let now = state.clock.now();
    let reservation = ops::allocate_spot(&state.pool, &user.actor(), lot_id, now).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: reservation })))
}

/// POST /api/v1/reservations/{id}/release
///
/// Close the caller's reservation and return the bill.
pub async fn release(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<ReleaseReceipt>>> {
    let now = state.clock.now();
    let receipt = ops::release_spot(&state.pool, &user.actor(), id, now).await?;
    Ok(Json(DataResponse { data: receipt }))
}

/// GET /api/v1/user/reservations?state=open|closed
///
/// The caller's reservations, newest first. Without `state`, all of them.
pub async fn list_mine(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(params): AppQuery<ReservationListQuery>,
) -> AppResult<Json<DataResponse<Vec<Reservation>>>> {
    let reservations = match params.state {
        Some(ReservationState::Open) => {
            ReservationRepo::list_open_for_user(&state.pool, user.user_id).await?
        }
        Some(ReservationState::Closed) => {
            ReservationRepo::list_closed_for_user(&state.pool, user.user_id).await?
        }
        None => ReservationRepo::list_for_user(&state.pool, user.user_id).await?,
    };
    Ok(Json(DataResponse { data: reservations }))
}
