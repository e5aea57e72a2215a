use parkwise_core::actor::Actor;
use parkwise_core::error::CoreError;
use parkwise_core::types::DbId;
use sqlx::PgPool;

use crate::error::OpResult;
use crate::repositories::{LotRepo, SpotRepo};

/// Delete a single available spot. Admin only.
///
/// Removing a spot from a converged lot lowers its declared capacity by one,
/// and the last spot of a lot cannot be removed. Removing a surplus spot
/// from a lot above its capacity only closes the gap. Fails with `Conflict`
/// when the spot is occupied.
pub async fn delete_spot(pool: &PgPool, actor: &Actor, spot_id: DbId) -> OpResult<()> {
    actor.require_admin()?;

    let not_found = || CoreError::NotFound {
        entity: "Spot",
        id: spot_id,
    };

    let mut tx = pool.begin().await?;
    let spot = SpotRepo::find_by_id(&mut *tx, spot_id)
        .await?
        .ok_or_else(not_found)?;
    let lot = LotRepo::lock(&mut *tx, spot.lot_id)
        .await?
        .ok_or_else(not_found)?;

    let counts = SpotRepo::count_by_status(&mut *tx, lot.id).await?;
    let surplus = counts.total > i64::from(lot.capacity);
    if !surplus && lot.capacity <= 1 {
        return Err(CoreError::Conflict(format!(
            "Spot {spot_id} is the last spot of lot {}; delete the lot instead",
            lot.id
        ))
        .into());
    }

    SpotRepo::delete_if_available(&mut *tx, spot_id).await?;
    if !surplus {
        LotRepo::set_capacity(&mut *tx, lot.id, lot.capacity - 1).await?;
    }
    tx.commit().await?;

    tracing::info!(
        spot_id,
        lot_id = lot.id,
        capacity_lowered = !surplus,
        admin_id = actor.user_id,
        "Spot deleted"
    );
    Ok(())
}
