pub mod admin;
pub mod auth;
pub mod lots;
pub mod reservations;
pub mod spots;
