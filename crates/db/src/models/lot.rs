//! Lot entity model and DTOs.

use parkwise_core::capacity::CapacityOutcome;
use parkwise_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A lot row from the `lots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lot {
    pub id: DbId,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub pincode: Option<String>,
    /// Declared capacity. May be below the actual spot count while a shrink
    /// is blocked by occupied spots.
    pub capacity: i32,
    pub price_per_hour: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A lot joined with its live spot counts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LotWithOccupancy {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub lot: Lot,
    pub spot_count: i64,
    pub available_spots: i64,
    pub occupied_spots: i64,
}

/// Result of an edit: the updated lot plus what the capacity adjuster did.
#[derive(Debug, Clone, Serialize)]
pub struct LotAdjustment {
    pub lot: LotWithOccupancy,
    pub capacity: CapacityOutcome,
}

/// DTO for creating a new lot. Spots are created alongside it.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLot {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 200))]
    pub address: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 20))]
    pub pincode: Option<String>,
    pub capacity: i32,
    pub price_per_hour: Decimal,
}

/// DTO for editing a lot. All fields are optional; a changed `capacity`
/// triggers the capacity adjuster.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateLot {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 200))]
    pub address: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 20))]
    pub pincode: Option<String>,
    pub capacity: Option<i32>,
    pub price_per_hour: Option<Decimal>,
}

/// Query parameters for lot listing (`?search=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LotListQuery {
    /// Case-insensitive match against name, address, city and pincode.
    pub search: Option<String>,
}
