pub mod admin;
pub mod auth;
pub mod health;
pub mod lots;
pub mod reservations;
pub mod spots;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
///
/// /lots                                list (auth), create (admin)
/// /lots/{id}                           get (auth), update, delete (admin)
/// /lots/{id}/spots                     list spots (admin)
/// /lots/{id}/reservations              allocate a spot (user role)
///
/// /spots/{id}                          delete (admin)
///
/// /reservations/{id}/release           release (owner, user role)
///
/// /user/reservations                   caller's reservations (auth)
///
/// /admin/users                         list users (admin)
/// /admin/reservations                  all reservations (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/lots", lots::router())
        .nest("/spots", spots::router())
        .nest("/reservations", reservations::router())
        .nest("/user", user::router())
        .nest("/admin", admin::router())
}
