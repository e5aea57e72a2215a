use parkwise_core::actor::Actor;
use parkwise_core::allocation::first_fit;
use parkwise_core::clock::to_db_precision;
use parkwise_core::error::CoreError;
use parkwise_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::error::OpResult;
use crate::models::reservation::{OpenReservation, Reservation};
use crate::repositories::{LotRepo, ReservationRepo, SpotRepo};

/// Assign the lowest-id available spot of `lot_id` to `actor` and open a
/// reservation for it at `now`.
///
/// The spot transition and the ledger entry commit together. Fails with
/// `Forbidden` unless `actor` has the `user` role, `NotFound` for an unknown
/// lot and `NoAvailableSpot` when the lot is full.
pub async fn allocate_spot(
    pool: &PgPool,
    actor: &Actor,
    lot_id: DbId,
    now: Timestamp,
) -> OpResult<Reservation> {
    actor.require_user()?;
    let opened_at = to_db_precision(now);

    let mut tx = pool.begin().await?;

    let lot = LotRepo::lock(&mut *tx, lot_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Lot",
            id: lot_id,
        })?;

    let available = SpotRepo::list_available_ids(&mut *tx, lot_id).await?;
    let spot_id = match first_fit(lot_id, &available) {
        Ok(id) => id,
        Err(err) => {
            tracing::info!(lot_id, user_id = actor.user_id, "Lot full, allocation refused");
            return Err(err.into());
        }
    };

    SpotRepo::mark_occupied(&mut *tx, spot_id, actor.user_id).await?;
    let reservation = ReservationRepo::open(
        &mut *tx,
        &OpenReservation {
            spot_id,
            lot_id,
            user_id: actor.user_id,
            rate_per_hour: lot.price_per_hour,
            opened_at,
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        lot_id,
        spot_id,
        reservation_id = reservation.id,
        user_id = actor.user_id,
        "Spot allocated"
    );
    Ok(reservation)
}
