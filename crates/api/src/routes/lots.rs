//! Route definitions for the `/lots` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{lots, reservations};
use crate::state::AppState;

/// Routes mounted at `/lots`.
///
/// ```text
/// GET    /                    -> list_lots
/// POST   /                    -> create_lot
/// GET    /{id}                -> get_lot
/// PUT    /{id}                -> update_lot
/// DELETE /{id}                -> delete_lot
/// GET    /{id}/spots          -> list_spots
/// POST   /{id}/reservations   -> allocate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lots::list_lots).post(lots::create_lot))
        .route(
            "/{id}",
            get(lots::get_lot)
                .put(lots::update_lot)
                .delete(lots::delete_lot),
        )
        .route("/{id}/spots", get(lots::list_spots))
        .route("/{id}/reservations", post(reservations::allocate))
}
