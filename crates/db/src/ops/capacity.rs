//! Executes capacity plans against a lot's spot inventory.

use parkwise_core::capacity::{plan_adjustment, CapacityOutcome, CapacityPlan};
use parkwise_core::types::DbId;
use sqlx::PgConnection;

use crate::models::lot::Lot;
use crate::repositories::SpotRepo;

/// Bring the lot's spot inventory towards `target` spots.
///
/// Grows by appending available spots; shrinks by deleting available spots
/// lowest id first. Occupied spots are left alone, so after a shrink the
/// outcome may report a positive divergence. The caller must hold the lot
/// lock.
pub(super) async fn apply_capacity(
    conn: &mut PgConnection,
    lot_id: DbId,
    target: i32,
) -> Result<CapacityOutcome, sqlx::Error> {
    let counts = SpotRepo::count_by_status(&mut *conn, lot_id).await?;
    let available = SpotRepo::list_available_ids(&mut *conn, lot_id).await?;
    let target = i64::from(target);

    let mut outcome = CapacityOutcome {
        spot_count: counts.total,
        ..Default::default()
    };

    match plan_adjustment(counts.total, target, &available) {
        CapacityPlan::Unchanged => {}
        CapacityPlan::Grow { add } => {
            let created = SpotRepo::create_many(&mut *conn, lot_id, add).await?;
            outcome.spots_added = created.len() as i64;
            outcome.spot_count += outcome.spots_added;
        }
        CapacityPlan::Shrink { remove, blocked } => {
            let removed = SpotRepo::delete_available(&mut *conn, &remove).await?;
            outcome.spot_count -= removed.len() as i64;
            if blocked > 0 {
                tracing::warn!(
                    lot_id,
                    blocked,
                    "Shrink blocked by occupied spots; lot stays above capacity"
                );
            }
            outcome.spots_removed = removed;
        }
    }

    outcome.divergence = outcome.spot_count - target;
    tracing::debug!(
        lot_id,
        target,
        added = outcome.spots_added,
        removed = outcome.spots_removed.len(),
        spot_count = outcome.spot_count,
        divergence = outcome.divergence,
        "Capacity applied"
    );
    Ok(outcome)
}

/// Trim a lot that sits above its declared capacity after spots were freed.
///
/// Returns the ids of the spots removed; empty when the lot has converged.
pub(super) async fn reconcile(
    conn: &mut PgConnection,
    lot: &Lot,
) -> Result<Vec<DbId>, sqlx::Error> {
    let counts = SpotRepo::count_by_status(&mut *conn, lot.id).await?;
    if counts.total <= i64::from(lot.capacity) {
        return Ok(Vec::new());
    }
    let outcome = apply_capacity(conn, lot.id, lot.capacity).await?;
    if !outcome.spots_removed.is_empty() {
        tracing::info!(
            lot_id = lot.id,
            removed = outcome.spots_removed.len(),
            divergence = outcome.divergence,
            "Reconciled lot towards declared capacity"
        );
    }
    Ok(outcome.spots_removed)
}
