//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods.
//! Single-statement reads accept any `PgExecutor` (a pool or an open
//! transaction); multi-statement writes take `&mut PgConnection` so they can
//! run inside the caller's transaction.

pub mod lot_repo;
pub mod reservation_repo;
mod search;
pub mod spot_repo;
pub mod user_repo;

pub use lot_repo::LotRepo;
pub use reservation_repo::ReservationRepo;
pub use spot_repo::SpotRepo;
pub use user_repo::UserRepo;
