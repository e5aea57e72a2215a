//! Spot occupancy state machine.
//!
//! A spot is either `Available` or `Occupied`. The only legal transitions
//! are `Available -> Occupied` (allocation) and `Occupied -> Available`
//! (release). Discriminants match the seed rows of the `spot_statuses`
//! lookup table.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Status ID type matching SMALLINT in the database.
pub type StatusId = i16;

#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpotStatus {
    Available = 1,
    Occupied = 2,
}

impl SpotStatus {
    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
        }
    }

    /// Validate a transition from `self` to `next` for the given spot.
    ///
    /// Returns the new status, or `InvalidState` when the spot is already in
    /// the requested state (double-occupy, double-free).
    pub fn transition_to(self, next: SpotStatus, spot_id: DbId) -> Result<SpotStatus, CoreError> {
        match (self, next) {
            (Self::Available, Self::Occupied) | (Self::Occupied, Self::Available) => Ok(next),
            (Self::Occupied, Self::Occupied) => Err(CoreError::InvalidState(format!(
                "Spot {spot_id} is already occupied"
            ))),
            (Self::Available, Self::Available) => Err(CoreError::InvalidState(format!(
                "Spot {spot_id} is not occupied"
            ))),
        }
    }

    /// A spot may only be removed while nobody is parked in it.
    pub fn ensure_deletable(self, spot_id: DbId) -> Result<(), CoreError> {
        match self {
            Self::Available => Ok(()),
            Self::Occupied => Err(CoreError::Conflict(format!(
                "Spot {spot_id} is occupied and cannot be deleted"
            ))),
        }
    }
}

impl From<SpotStatus> for StatusId {
    fn from(value: SpotStatus) -> Self {
        value as StatusId
    }
}

impl TryFrom<StatusId> for SpotStatus {
    type Error = CoreError;

    fn try_from(value: StatusId) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Available),
            2 => Ok(Self::Occupied),
            other => Err(CoreError::Internal(format!("Unknown spot status id {other}"))),
        }
    }
}

impl std::fmt::Display for SpotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
