//! Route definitions for the `/spots` resource.

use axum::routing::delete;
use axum::Router;

use crate::handlers::spots;
use crate::state::AppState;

/// ```text
/// DELETE /{id} -> delete_spot
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", delete(spots::delete_spot))
}
