//! Transactional reservation operations.
//!
//! Each function opens one transaction, takes the owning lot's row lock,
//! runs the domain rules from `parkwise_core` against the repositories and
//! commits. Any error drops the transaction uncommitted, which rolls back
//! every write made so far.

mod allocation;
mod capacity;
mod lots;
mod release;
mod spots;

pub use allocation::allocate_spot;
pub use lots::{create_lot, delete_lot, edit_lot};
pub use release::release_spot;
pub use spots::delete_spot;

use parkwise_core::error::CoreError;
use validator::Validate;

/// Run `validator` derive rules and surface failures as a domain error.
fn validate_input(input: &impl Validate) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))
}
