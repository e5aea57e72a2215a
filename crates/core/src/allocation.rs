//! Spot allocation policy.
//!
//! Allocation is a deterministic first-fit: among the available spots of a
//! lot, the one with the lowest identifier wins. Identifiers are monotonic,
//! so this is also creation order.

use crate::error::CoreError;
use crate::types::DbId;

/// Pick the spot to assign from the available candidates of `lot_id`.
///
/// Candidates are normally already sorted ascending by the registry query;
/// the minimum is taken anyway so the result does not depend on input order.
pub fn first_fit(lot_id: DbId, available: &[DbId]) -> Result<DbId, CoreError> {
    available
        .iter()
        .copied()
        .min()
        .ok_or(CoreError::NoAvailableSpot { lot_id })
}
