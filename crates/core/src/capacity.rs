//! Capacity planning for lot resizes.
//!
//! Growing a lot appends fresh available spots. Shrinking removes available
//! spots lowest-id first and never touches occupied ones, so a shrink can
//! fall short of its target: the lot then keeps more spots than its declared
//! capacity until enough occupants leave. That gap is reported as
//! `divergence` and is closed by release-time reconciliation.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// Upper bound on a lot's declared capacity.
pub const MAX_LOT_CAPACITY: i32 = 10_000;

/// What has to happen to a lot's spot inventory to reach a target capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapacityPlan {
    Unchanged,
    Grow {
        add: i64,
    },
    Shrink {
        /// Available spot ids to delete, ascending.
        remove: Vec<DbId>,
        /// Spots that should go but are occupied and must stay for now.
        blocked: i64,
    },
}

/// Summary of an executed adjustment, returned to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CapacityOutcome {
    pub spots_added: i64,
    pub spots_removed: Vec<DbId>,
    /// Actual spot count after the adjustment.
    pub spot_count: i64,
    /// `spot_count - declared capacity`; positive while occupied spots
    /// prevent a shrink from converging.
    pub divergence: i64,
}

impl CapacityOutcome {
    pub fn is_converged(&self) -> bool {
        self.divergence == 0
    }
}

/// Validate a requested capacity value.
pub fn validate_capacity(capacity: i32) -> Result<(), CoreError> {
    if !(1..=MAX_LOT_CAPACITY).contains(&capacity) {
        return Err(CoreError::Validation(format!(
            "capacity must be between 1 and {MAX_LOT_CAPACITY}, got {capacity}"
        )));
    }
    Ok(())
}

/// Plan the transition from `current_spots` to `target_capacity`.
///
/// `current_spots` is the lot's actual spot inventory (which equals the
/// previous declared capacity whenever the lot has converged).
/// `available` holds the ids of its available spots.
pub fn plan_adjustment(
    current_spots: i64,
    target_capacity: i64,
    available: &[DbId],
) -> CapacityPlan {
    use std::cmp::Ordering;

    match target_capacity.cmp(&current_spots) {
        Ordering::Equal => CapacityPlan::Unchanged,
        Ordering::Greater => CapacityPlan::Grow {
            add: target_capacity - current_spots,
        },
        Ordering::Less => {
            let excess = current_spots - target_capacity;
            let mut candidates = available.to_vec();
            candidates.sort_unstable();
            candidates.truncate(usize::try_from(excess).unwrap_or(usize::MAX));
            let blocked = excess - candidates.len() as i64;
            CapacityPlan::Shrink {
                remove: candidates,
                blocked,
            }
        }
    }
}
