//! Repository for the `spots` table: the spot registry.
//!
//! Status changes lock the spot row, let [`SpotStatus::transition_to`]
//! decide whether the move is legal, then write it. Callers are expected to
//! already hold the owning lot's row lock.

use parkwise_core::error::CoreError;
use parkwise_core::spot::SpotStatus;
use parkwise_core::types::DbId;
use sqlx::{PgConnection, PgExecutor};

use crate::error::{OpError, OpResult};
use crate::models::spot::{Spot, SpotCounts};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, lot_id, status_id, occupied_by, created_at, updated_at";

/// Provides spot inventory and occupancy operations.
pub struct SpotRepo;

impl SpotRepo {
    /// Append `count` available spots to a lot, returned in id order.
    pub async fn create_many(
        conn: &mut PgConnection,
        lot_id: DbId,
        count: i64,
    ) -> Result<Vec<Spot>, sqlx::Error> {
        if count <= 0 {
            return Ok(Vec::new());
        }
        let query = format!(
            "INSERT INTO spots (lot_id, status_id)
             SELECT $1, $2 FROM generate_series(1, $3)
             RETURNING {COLUMNS}"
        );
        let mut spots = sqlx::query_as::<_, Spot>(&query)
            .bind(lot_id)
            .bind(SpotStatus::Available.id())
            .bind(count)
            .fetch_all(conn)
            .await?;
        spots.sort_by_key(|s| s.id);
        Ok(spots)
    }

    /// Find a spot by its internal ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Spot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM spots WHERE id = $1");
        sqlx::query_as::<_, Spot>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a spot and lock its row.
    pub async fn lock(conn: &mut PgConnection, id: DbId) -> Result<Option<Spot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM spots WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Spot>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// All spots of a lot, ordered by id.
    pub async fn list_by_lot<'e>(
        executor: impl PgExecutor<'e>,
        lot_id: DbId,
    ) -> Result<Vec<Spot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM spots WHERE lot_id = $1 ORDER BY id");
        sqlx::query_as::<_, Spot>(&query)
            .bind(lot_id)
            .fetch_all(executor)
            .await
    }

    /// Available spots of a lot, ordered by id ascending.
    pub async fn list_available<'e>(
        executor: impl PgExecutor<'e>,
        lot_id: DbId,
    ) -> Result<Vec<Spot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM spots WHERE lot_id = $1 AND status_id = $2 ORDER BY id"
        );
        sqlx::query_as::<_, Spot>(&query)
            .bind(lot_id)
            .bind(SpotStatus::Available.id())
            .fetch_all(executor)
            .await
    }

    /// Ids of a lot's available spots, ascending.
    pub async fn list_available_ids<'e>(
        executor: impl PgExecutor<'e>,
        lot_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM spots WHERE lot_id = $1 AND status_id = $2 ORDER BY id",
        )
        .bind(lot_id)
        .bind(SpotStatus::Available.id())
        .fetch_all(executor)
        .await
    }

    /// Total, available and occupied spot counts for a lot.
    pub async fn count_by_status<'e>(
        executor: impl PgExecutor<'e>,
        lot_id: DbId,
    ) -> Result<SpotCounts, sqlx::Error> {
        sqlx::query_as::<_, SpotCounts>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE status_id = $2) AS available,
                    COUNT(*) FILTER (WHERE status_id = $3) AS occupied
             FROM spots WHERE lot_id = $1",
        )
        .bind(lot_id)
        .bind(SpotStatus::Available.id())
        .bind(SpotStatus::Occupied.id())
        .fetch_one(executor)
        .await
    }

    /// Mark a spot occupied by `user_id`.
    ///
    /// Fails with `NotFound` for an unknown spot and `InvalidState` if it is
    /// already occupied.
    pub async fn mark_occupied(
        conn: &mut PgConnection,
        spot_id: DbId,
        user_id: DbId,
    ) -> OpResult<Spot> {
        Self::transition(conn, spot_id, SpotStatus::Occupied, Some(user_id)).await
    }

    /// Mark a spot available and clear its occupant.
    ///
    /// Fails with `NotFound` for an unknown spot and `InvalidState` if it is
    /// not currently occupied.
    pub async fn mark_available(conn: &mut PgConnection, spot_id: DbId) -> OpResult<Spot> {
        Self::transition(conn, spot_id, SpotStatus::Available, None).await
    }

    async fn transition(
        conn: &mut PgConnection,
        spot_id: DbId,
        next: SpotStatus,
        occupied_by: Option<DbId>,
    ) -> OpResult<Spot> {
        let current = Self::lock(&mut *conn, spot_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Spot",
                id: spot_id,
            })?;
        let next = current.status.transition_to(next, spot_id)?;

        let query = format!(
            "UPDATE spots SET status_id = $2, occupied_by = $3
             WHERE id = $1 AND status_id = $4
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Spot>(&query)
            .bind(spot_id)
            .bind(next.id())
            .bind(occupied_by)
            .bind(current.status.id())
            .fetch_optional(conn)
            .await?;

        updated.ok_or_else(|| {
            OpError::from(CoreError::InvalidState(format!(
                "Spot {spot_id} changed status concurrently"
            )))
        })
    }

    /// Delete a single spot if it is available.
    ///
    /// Fails with `NotFound` for an unknown spot and `Conflict` for an
    /// occupied one.
    pub async fn delete_if_available(conn: &mut PgConnection, spot_id: DbId) -> OpResult<Spot> {
        let spot = Self::lock(&mut *conn, spot_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Spot",
                id: spot_id,
            })?;
        spot.status.ensure_deletable(spot_id)?;
        sqlx::query("DELETE FROM spots WHERE id = $1")
            .bind(spot_id)
            .execute(conn)
            .await?;
        Ok(spot)
    }

    /// Delete the given spots, skipping any that are not available.
    /// Returns the ids actually removed, ascending.
    pub async fn delete_available(
        conn: &mut PgConnection,
        ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut removed = sqlx::query_scalar::<_, DbId>(
            "DELETE FROM spots WHERE id = ANY($1) AND status_id = $2 RETURNING id",
        )
        .bind(ids)
        .bind(SpotStatus::Available.id())
        .fetch_all(conn)
        .await?;
        removed.sort_unstable();
        Ok(removed)
    }
}
