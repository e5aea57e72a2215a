//! Spot entity model.

use parkwise_core::spot::SpotStatus;
use parkwise_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A spot row from the `spots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Spot {
    pub id: DbId,
    pub lot_id: DbId,
    #[sqlx(rename = "status_id", try_from = "i16")]
    pub status: SpotStatus,
    /// Occupant tag: the user currently parked here.
    pub occupied_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Spot counts for a single lot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow, Serialize)]
pub struct SpotCounts {
    pub total: i64,
    pub available: i64,
    pub occupied: i64,
}
