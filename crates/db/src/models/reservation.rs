//! Reservation entity model and DTOs.

use parkwise_core::billing::BillingSummary;
use parkwise_core::reservation::ReservationState;
use parkwise_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A reservation row from the `reservations` table.
///
/// `spot_id` and `lot_id` are only null on closed history rows whose spot or
/// lot has since been deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reservation {
    pub id: DbId,
    pub spot_id: Option<DbId>,
    pub lot_id: Option<DbId>,
    pub user_id: DbId,
    /// Lot price captured when the reservation was opened.
    pub rate_per_hour: Decimal,
    pub opened_at: Timestamp,
    pub closed_at: Option<Timestamp>,
    pub total_cost: Option<Decimal>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Reservation {
    pub fn state(&self) -> ReservationState {
        ReservationState::of(self.closed_at)
    }

    pub fn is_open(&self) -> bool {
        self.state() == ReservationState::Open
    }
}

/// Insert DTO used by the ledger when a spot is allocated.
#[derive(Debug, Clone)]
pub struct OpenReservation {
    pub spot_id: DbId,
    pub lot_id: DbId,
    pub user_id: DbId,
    pub rate_per_hour: Decimal,
    pub opened_at: Timestamp,
}

/// What a release returns: the closed record and its bill.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseReceipt {
    pub reservation: Reservation,
    #[serde(flatten)]
    pub billing: BillingSummary,
    /// Spots trimmed because the lot was above its declared capacity.
    pub reconciled_spots: Vec<DbId>,
}

/// Query parameters for the caller's reservation history (`?state=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationListQuery {
    pub state: Option<ReservationState>,
}
