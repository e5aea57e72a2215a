//! Route definitions for the `/reservations` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::reservations;
use crate::state::AppState;

/// Routes mounted at `/reservations`.
///
/// ```text
/// POST /{id}/release -> release
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/release", post(reservations::release))
}
