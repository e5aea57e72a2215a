use parkwise_core::actor::Actor;
use parkwise_core::billing::bill;
use parkwise_core::error::CoreError;
use parkwise_core::reservation::{authorize_close, effective_close_time};
use parkwise_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use super::capacity::reconcile;
use crate::error::OpResult;
use crate::models::reservation::ReleaseReceipt;
use crate::repositories::{LotRepo, ReservationRepo, SpotRepo};

/// Close `actor`'s reservation at `now`, free its spot and bill the stay.
///
/// Errors, in the order they are checked: `NotFound` for an unknown
/// reservation, `Forbidden` when `actor` is not its owner, `AlreadyClosed`
/// when it was released before. On any error nothing changes.
///
/// If the lot sits above its declared capacity, the freed spot (and any
/// other available surplus) is trimmed in the same transaction.
pub async fn release_spot(
    pool: &PgPool,
    actor: &Actor,
    reservation_id: DbId,
    now: Timestamp,
) -> OpResult<ReleaseReceipt> {
    let mut tx = pool.begin().await?;

    let reservation = ReservationRepo::lock(&mut *tx, reservation_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Reservation",
            id: reservation_id,
        })?;
    authorize_close(actor, reservation_id, reservation.user_id, reservation.closed_at)?;

    let (Some(spot_id), Some(lot_id)) = (reservation.spot_id, reservation.lot_id) else {
        return Err(CoreError::Internal(format!(
            "Open reservation {reservation_id} has no spot"
        ))
        .into());
    };

    let lot = LotRepo::lock(&mut *tx, lot_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Lot",
            id: lot_id,
        })?;

    let closed_at = effective_close_time(reservation.opened_at, now);
    let billing = bill(reservation.opened_at, closed_at, reservation.rate_per_hour);

    SpotRepo::mark_available(&mut *tx, spot_id).await?;
    let closed = ReservationRepo::close(&mut *tx, reservation_id, closed_at, billing.total_cost)
        .await?
        .ok_or(CoreError::AlreadyClosed { reservation_id })?;

    let reconciled_spots = reconcile(&mut *tx, &lot).await?;

    tx.commit().await?;

    tracing::info!(
        reservation_id,
        lot_id,
        spot_id,
        user_id = actor.user_id,
        duration_minutes = %billing.duration_minutes,
        total_cost = %billing.total_cost,
        "Spot released"
    );
    Ok(ReleaseReceipt {
        reservation: closed,
        billing,
        reconciled_spots,
    })
}
