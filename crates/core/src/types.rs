/// Primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// UTC instant; reservations open and close on these.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Exact currency amount (`NUMERIC(10, 2)` in the database).
pub type Money = rust_decimal::Decimal;
