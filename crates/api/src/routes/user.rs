//! Route definitions for the caller's own resources, mounted at `/user`.

use axum::routing::get;
use axum::Router;

use crate::handlers::reservations;
use crate::state::AppState;

/// ```text
/// GET /reservations?state=open|closed -> list_mine
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/reservations", get(reservations::list_mine))
}
