//! Domain logic for the Parkwise reservation service.
//!
//! Everything in this crate is pure: no I/O, no database, no clock reads
//! except through the [`clock::Clock`] seam. The `parkwise-db` crate drives
//! these rules inside database transactions.

pub mod actor;
pub mod allocation;
pub mod billing;
pub mod capacity;
pub mod clock;
pub mod error;
pub mod lot;
pub mod reservation;
pub mod roles;
pub mod spot;
pub mod types;
