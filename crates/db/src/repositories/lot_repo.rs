//! Repository for the `lots` table.

use parkwise_core::spot::SpotStatus;
use parkwise_core::types::DbId;
use sqlx::{PgConnection, PgExecutor};

use super::search::contains_pattern;
use crate::models::lot::{CreateLot, Lot, LotWithOccupancy, UpdateLot};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, address, city, pincode, capacity, price_per_hour, created_at, updated_at";

/// Lot columns joined with live spot counts. Expects `$1` = available
/// status id and `$2` = occupied status id; callers append `WHERE` and
/// `GROUP BY l.id`.
const OCCUPANCY_SELECT: &str = "\
    SELECT l.id, l.name, l.address, l.city, l.pincode, l.capacity, l.price_per_hour, \
           l.created_at, l.updated_at, \
           COUNT(s.id) AS spot_count, \
           COUNT(s.id) FILTER (WHERE s.status_id = $1) AS available_spots, \
           COUNT(s.id) FILTER (WHERE s.status_id = $2) AS occupied_spots \
    FROM lots l \
    LEFT JOIN spots s ON s.lot_id = l.id";

/// Provides CRUD operations for lots.
pub struct LotRepo;

impl LotRepo {
    /// Insert a new lot, returning the created row. Does not create spots.
    pub async fn create(conn: &mut PgConnection, input: &CreateLot) -> Result<Lot, sqlx::Error> {
        let query = format!(
            "INSERT INTO lots (name, address, city, pincode, capacity, price_per_hour)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lot>(&query)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.pincode)
            .bind(input.capacity)
            .bind(input.price_per_hour)
            .fetch_one(conn)
            .await
    }

    /// Find a lot by its internal ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Lot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lots WHERE id = $1");
        sqlx::query_as::<_, Lot>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a lot and take a row lock on it for the rest of the transaction.
    ///
    /// Every operation that mutates a lot's spots goes through this lock, so
    /// allocation, release and capacity changes serialize per lot.
    pub async fn lock(conn: &mut PgConnection, id: DbId) -> Result<Option<Lot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lots WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Lot>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Find a lot with its spot counts.
    pub async fn find_with_occupancy<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<LotWithOccupancy>, sqlx::Error> {
        let query = format!("{OCCUPANCY_SELECT} WHERE l.id = $3 GROUP BY l.id");
        sqlx::query_as::<_, LotWithOccupancy>(&query)
            .bind(SpotStatus::Available.id())
            .bind(SpotStatus::Occupied.id())
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List lots with spot counts, oldest first.
    ///
    /// When `search` is given, only lots whose name, address, city or
    /// pincode contains it (case-insensitive) are returned.
    pub async fn list_with_occupancy<'e>(
        executor: impl PgExecutor<'e>,
        search: Option<&str>,
    ) -> Result<Vec<LotWithOccupancy>, sqlx::Error> {
        let pattern = contains_pattern(search);
        let query = format!(
            "{OCCUPANCY_SELECT} \
             WHERE $3::TEXT IS NULL \
                OR l.name ILIKE $3 OR l.address ILIKE $3 \
                OR l.city ILIKE $3 OR l.pincode ILIKE $3 \
             GROUP BY l.id \
             ORDER BY l.id"
        );
        sqlx::query_as::<_, LotWithOccupancy>(&query)
            .bind(SpotStatus::Available.id())
            .bind(SpotStatus::Occupied.id())
            .bind(pattern)
            .fetch_all(executor)
            .await
    }

    /// Update a lot. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. Spot inventory
    /// is not touched here; see `ops::lots::edit_lot`.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateLot,
    ) -> Result<Option<Lot>, sqlx::Error> {
        let query = format!(
            "UPDATE lots SET
                name = COALESCE($2, name),
                address = COALESCE($3, address),
                city = COALESCE($4, city),
                pincode = COALESCE($5, pincode),
                capacity = COALESCE($6, capacity),
                price_per_hour = COALESCE($7, price_per_hour)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lot>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.pincode)
            .bind(input.capacity)
            .bind(input.price_per_hour)
            .fetch_optional(conn)
            .await
    }

    /// Set the declared capacity without touching any other field.
    pub async fn set_capacity(
        conn: &mut PgConnection,
        id: DbId,
        capacity: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE lots SET capacity = $2 WHERE id = $1")
            .bind(id)
            .bind(capacity)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a lot by ID; its spots go with it (`ON DELETE CASCADE`).
    /// Returns `true` if a row was removed.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lots WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
