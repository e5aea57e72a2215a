//! Handlers for the `/lots` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use parkwise_core::error::CoreError;
use parkwise_core::types::DbId;
use parkwise_db::models::lot::{CreateLot, LotAdjustment, LotListQuery, LotWithOccupancy, UpdateLot};
use parkwise_db::models::spot::Spot;
use parkwise_db::ops;
use parkwise_db::repositories::{LotRepo, SpotRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn lot_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Lot", id })
}

/// GET /api/v1/lots?search=
///
/// Lots with their available and occupied spot counts.
pub async fn list_lots(
    State(state): State<AppState>,
    _user: AuthUser,
    AppQuery(params): AppQuery<LotListQuery>,
) -> AppResult<Json<DataResponse<Vec<LotWithOccupancy>>>> {
    let lots = LotRepo::list_with_occupancy(&state.pool, params.search.as_deref()).await?;
    Ok(Json(DataResponse { data: lots }))
}

/// POST /api/v1/lots
pub async fn create_lot(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CreateLot>,
) -> AppResult<(StatusCode, Json<DataResponse<LotWithOccupancy>>)> {
    let lot = ops::create_lot(&state.pool, &admin.actor(), &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: lot })))
}

/// GET /api/v1/lots/{id}
pub async fn get_lot(
    State(state): State<AppState>,
    _user: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<LotWithOccupancy>>> {
    let lot = LotRepo::find_with_occupancy(&state.pool, id)
        .await?
        .ok_or_else(|| lot_not_found(id))?;
    Ok(Json(DataResponse { data: lot }))
}

/// PUT /api/v1/lots/{id}
///
/// Edit lot details. A changed `capacity` grows or shrinks the spot
/// inventory; the response reports what the adjustment did.
pub async fn update_lot(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateLot>,
) -> AppResult<Json<DataResponse<LotAdjustment>>> {
    let adjustment = ops::edit_lot(&state.pool, &admin.actor(), id, &input).await?;
    Ok(Json(DataResponse { data: adjustment }))
}

/// DELETE /api/v1/lots/{id}
///
/// 409 while any spot of the lot is occupied.
pub async fn delete_lot(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    ops::delete_lot(&state.pool, &admin.actor(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/lots/{id}/spots
pub async fn list_spots(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<Spot>>>> {
    LotRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| lot_not_found(id))?;
    let spots = SpotRepo::list_by_lot(&state.pool, id).await?;
    Ok(Json(DataResponse { data: spots }))
}
