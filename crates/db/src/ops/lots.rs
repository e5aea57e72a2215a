//! Lot lifecycle: create, edit (with capacity adjustment) and delete.

use parkwise_core::actor::Actor;
use parkwise_core::capacity::{validate_capacity, CapacityOutcome};
use parkwise_core::error::CoreError;
use parkwise_core::lot::{normalize_text, validate_price_per_hour};
use parkwise_core::types::DbId;
use sqlx::PgPool;

use super::capacity::apply_capacity;
use super::validate_input;
use crate::error::OpResult;
use crate::models::lot::{CreateLot, LotAdjustment, LotWithOccupancy, UpdateLot};
use crate::repositories::{LotRepo, SpotRepo};

fn lot_not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: "Lot", id }
}

/// Create a lot together with `capacity` available spots. Admin only.
pub async fn create_lot(
    pool: &PgPool,
    actor: &Actor,
    input: &CreateLot,
) -> OpResult<LotWithOccupancy> {
    actor.require_admin()?;

    let input = CreateLot {
        name: input.name.trim().to_string(),
        address: normalize_text(input.address.as_deref()),
        city: normalize_text(input.city.as_deref()),
        pincode: normalize_text(input.pincode.as_deref()),
        capacity: input.capacity,
        price_per_hour: input.price_per_hour,
    };
    validate_input(&input)?;
    validate_capacity(input.capacity)?;
    validate_price_per_hour(input.price_per_hour)?;

    let mut tx = pool.begin().await?;
    let lot = LotRepo::create(&mut *tx, &input).await?;
    SpotRepo::create_many(&mut *tx, lot.id, i64::from(lot.capacity)).await?;
    let created = LotRepo::find_with_occupancy(&mut *tx, lot.id)
        .await?
        .ok_or_else(|| lot_not_found(lot.id))?;
    tx.commit().await?;

    tracing::info!(
        lot_id = lot.id,
        name = %lot.name,
        capacity = lot.capacity,
        admin_id = actor.user_id,
        "Lot created"
    );
    Ok(created)
}

/// Edit a lot's details. Admin only.
///
/// A `capacity` in the input runs the capacity adjuster against the lot's
/// actual spot inventory. The declared capacity is stored as requested even
/// when occupied spots keep the lot above it; the returned outcome reports
/// that divergence. Blank optional text fields leave the stored value as is.
pub async fn edit_lot(
    pool: &PgPool,
    actor: &Actor,
    lot_id: DbId,
    input: &UpdateLot,
) -> OpResult<LotAdjustment> {
    actor.require_admin()?;

    let input = UpdateLot {
        name: input.name.as_deref().map(|n| n.trim().to_string()),
        address: normalize_text(input.address.as_deref()),
        city: normalize_text(input.city.as_deref()),
        pincode: normalize_text(input.pincode.as_deref()),
        capacity: input.capacity,
        price_per_hour: input.price_per_hour,
    };
    validate_input(&input)?;
    if let Some(capacity) = input.capacity {
        validate_capacity(capacity)?;
    }
    if let Some(price) = input.price_per_hour {
        validate_price_per_hour(price)?;
    }

    let mut tx = pool.begin().await?;
    let previous = LotRepo::lock(&mut *tx, lot_id)
        .await?
        .ok_or_else(|| lot_not_found(lot_id))?;
    let lot = LotRepo::update(&mut *tx, lot_id, &input)
        .await?
        .ok_or_else(|| lot_not_found(lot_id))?;

    let capacity = match input.capacity {
        Some(target) => apply_capacity(&mut *tx, lot_id, target).await?,
        None => {
            let counts = SpotRepo::count_by_status(&mut *tx, lot_id).await?;
            CapacityOutcome {
                spot_count: counts.total,
                divergence: counts.total - i64::from(lot.capacity),
                ..Default::default()
            }
        }
    };

    let updated = LotRepo::find_with_occupancy(&mut *tx, lot_id)
        .await?
        .ok_or_else(|| lot_not_found(lot_id))?;
    tx.commit().await?;

    tracing::info!(
        lot_id,
        old_capacity = previous.capacity,
        new_capacity = lot.capacity,
        spots_added = capacity.spots_added,
        spots_removed = capacity.spots_removed.len(),
        divergence = capacity.divergence,
        admin_id = actor.user_id,
        "Lot updated"
    );
    Ok(LotAdjustment {
        lot: updated,
        capacity,
    })
}

/// Delete a lot and all of its spots. Admin only.
///
/// Fails with `Conflict` while any spot is occupied. Closed reservations
/// stay in the ledger with their lot and spot references cleared.
pub async fn delete_lot(pool: &PgPool, actor: &Actor, lot_id: DbId) -> OpResult<()> {
    actor.require_admin()?;

    let mut tx = pool.begin().await?;
    LotRepo::lock(&mut *tx, lot_id)
        .await?
        .ok_or_else(|| lot_not_found(lot_id))?;

    let counts = SpotRepo::count_by_status(&mut *tx, lot_id).await?;
    if counts.occupied > 0 {
        return Err(CoreError::Conflict(format!(
            "Lot {lot_id} has {} occupied spot(s) and cannot be deleted",
            counts.occupied
        ))
        .into());
    }

    LotRepo::delete(&mut *tx, lot_id).await?;
    tx.commit().await?;

    tracing::info!(lot_id, spots = counts.total, admin_id = actor.user_id, "Lot deleted");
    Ok(())
}
