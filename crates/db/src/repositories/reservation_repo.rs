//! Repository for the `reservations` table: the reservation ledger.

use parkwise_core::error::CoreError;
use parkwise_core::reservation::ReservationState;
use parkwise_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgExecutor};

use crate::error::{is_unique_violation, OpError, OpResult};
use crate::models::reservation::{OpenReservation, Reservation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, spot_id, lot_id, user_id, rate_per_hour, opened_at, closed_at, \
                       total_cost, created_at, updated_at";

/// Partial unique index allowing one open reservation per spot.
const OPEN_SPOT_CONSTRAINT: &str = "uq_reservations_open_spot";

/// Provides reservation ledger operations.
pub struct ReservationRepo;

impl ReservationRepo {
    /// Record a new open reservation.
    ///
    /// Fails with `Conflict` if the spot already has an open reservation.
    pub async fn open(conn: &mut PgConnection, input: &OpenReservation) -> OpResult<Reservation> {
        if let Some(existing) = Self::find_open_for_spot(&mut *conn, input.spot_id).await? {
            return Err(CoreError::Conflict(format!(
                "Spot {} already has open reservation {}",
                input.spot_id, existing.id
            ))
            .into());
        }

        let query = format!(
            "INSERT INTO reservations (spot_id, lot_id, user_id, rate_per_hour, opened_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(input.spot_id)
            .bind(input.lot_id)
            .bind(input.user_id)
            .bind(input.rate_per_hour)
            .bind(input.opened_at)
            .fetch_one(conn)
            .await
            .map_err(|err| -> OpError {
                if is_unique_violation(&err, OPEN_SPOT_CONSTRAINT) {
                    CoreError::Conflict(format!(
                        "Spot {} already has an open reservation",
                        input.spot_id
                    ))
                    .into()
                } else {
                    err.into()
                }
            })
    }

    /// Find a reservation by its internal ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reservations WHERE id = $1");
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a reservation and lock its row.
    pub async fn lock(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reservations WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// The open reservation on a spot, if any.
    pub async fn find_open_for_spot<'e>(
        executor: impl PgExecutor<'e>,
        spot_id: DbId,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations WHERE spot_id = $1 AND closed_at IS NULL"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(spot_id)
            .fetch_optional(executor)
            .await
    }

    /// Close an open reservation, recording its end time and cost.
    ///
    /// Returns `None` if the reservation does not exist or is already
    /// closed, so a closed record is never rewritten.
    pub async fn close(
        conn: &mut PgConnection,
        id: DbId,
        closed_at: Timestamp,
        total_cost: Decimal,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!(
            "UPDATE reservations SET closed_at = $2, total_cost = $3
             WHERE id = $1 AND closed_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .bind(closed_at)
            .bind(total_cost)
            .fetch_optional(conn)
            .await
    }

    /// A user's open reservations, newest first.
    pub async fn list_open_for_user<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations
             WHERE user_id = $1 AND closed_at IS NULL
             ORDER BY opened_at DESC, id DESC"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(user_id)
            .fetch_all(executor)
            .await
    }

    /// A user's closed reservations, newest first.
    pub async fn list_closed_for_user<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations
             WHERE user_id = $1 AND closed_at IS NOT NULL
             ORDER BY opened_at DESC, id DESC"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(user_id)
            .fetch_all(executor)
            .await
    }

    /// Every reservation a user has made, newest first.
    pub async fn list_for_user<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations
             WHERE user_id = $1
             ORDER BY opened_at DESC, id DESC"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(user_id)
            .fetch_all(executor)
            .await
    }

    /// Every reservation in the system, newest first. `state` narrows the
    /// listing to open or closed records.
    pub async fn list_all<'e>(
        executor: impl PgExecutor<'e>,
        state: Option<ReservationState>,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations
             WHERE $1::BOOLEAN IS NULL OR (closed_at IS NULL) = $1
             ORDER BY opened_at DESC, id DESC"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(state.map(|s| s == ReservationState::Open))
            .fetch_all(executor)
            .await
    }

    /// Number of open reservations on spots of a lot.
    pub async fn count_open_for_lot<'e>(
        executor: impl PgExecutor<'e>,
        lot_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM reservations WHERE lot_id = $1 AND closed_at IS NULL",
        )
        .bind(lot_id)
        .fetch_one(executor)
        .await
    }
}
