//! Duration-based billing for closed reservations.
//!
//! Pricing model: `rate_per_hour * max(hours_parked, 1)`. Every stay is
//! charged at least one full hour, and longer stays are billed pro rata to
//! the second. Amounts are exact decimals rounded half-up to two places.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::types::{Money, Timestamp};

/// Minimum charge, in hours, applied to every reservation.
pub const MIN_BILLABLE_HOURS: Decimal = Decimal::ONE;

/// Decimal places kept on money and reported durations.
pub const MONEY_SCALE: u32 = 2;

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 3600;

/// The billing outcome attached to a release receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillingSummary {
    /// Actual time parked, in minutes, rounded to two places.
    pub duration_minutes: Decimal,
    /// Hours charged after the one-hour minimum is applied.
    pub billed_hours: Decimal,
    pub total_cost: Money,
}

/// Microseconds in a second; the finest resolution timestamps are stored at.
const MICROS_SCALE: u32 = 6;

/// Elapsed seconds between open and close, fraction included down to the
/// microsecond; never negative.
fn elapsed_secs(opened_at: Timestamp, closed_at: Timestamp) -> Decimal {
    let micros = (closed_at - opened_at)
        .num_microseconds()
        .unwrap_or(i64::MAX)
        .max(0);
    Decimal::new(micros, MICROS_SCALE)
}

/// Round half-up to [`MONEY_SCALE`] places and pin the scale so that
/// `250` renders as `250.00`.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Minutes parked between `opened_at` and `closed_at`, rounded to two places.
pub fn duration_minutes(opened_at: Timestamp, closed_at: Timestamp) -> Decimal {
    round_money(elapsed_secs(opened_at, closed_at) / Decimal::from(SECS_PER_MINUTE))
}

/// Hours charged for a stay, with the one-hour minimum applied.
pub fn billable_hours(opened_at: Timestamp, closed_at: Timestamp) -> Decimal {
    let hours = elapsed_secs(opened_at, closed_at) / Decimal::from(SECS_PER_HOUR);
    hours.max(MIN_BILLABLE_HOURS)
}

/// Cost of a stay. Callers guarantee `closed_at >= opened_at`; an inverted
/// pair is treated as a zero-length stay.
pub fn compute_cost(
    opened_at: Timestamp,
    closed_at: Timestamp,
    rate_per_hour: Money,
) -> Money {
    round_money(rate_per_hour * billable_hours(opened_at, closed_at))
}

pub fn bill(
    opened_at: Timestamp,
    closed_at: Timestamp,
    rate_per_hour: Money,
) -> BillingSummary {
    BillingSummary {
        duration_minutes: duration_minutes(opened_at, closed_at),
        billed_hours: billable_hours(opened_at, closed_at),
        total_cost: compute_cost(opened_at, closed_at, rate_per_hour),
    }
}
