//! Reservation ledger rules.
//!
//! A reservation is open while `closed_at` is null and becomes immutable
//! once closed. Only its owner may close it, and only once.

use serde::{Deserialize, Serialize};

use crate::actor::Actor;
use crate::clock::to_db_precision;
use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Lifecycle state of a reservation, derived from its close timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationState {
    Open,
    Closed,
}

impl ReservationState {
    pub fn of(closed_at: Option<Timestamp>) -> Self {
        match closed_at {
            Some(_) => Self::Closed,
            None => Self::Open,
        }
    }
}

/// Check that `actor` may close reservation `reservation_id`.
///
/// Ownership is checked before state so a non-owner learns nothing about
/// whether the reservation is still open.
pub fn authorize_close(
    actor: &Actor,
    reservation_id: DbId,
    owner_id: DbId,
    closed_at: Option<Timestamp>,
) -> Result<(), CoreError> {
    if actor.user_id != owner_id {
        return Err(CoreError::Forbidden(format!(
            "Reservation {reservation_id} belongs to another user"
        )));
    }
    if closed_at.is_some() {
        return Err(CoreError::AlreadyClosed { reservation_id });
    }
    Ok(())
}

/// The close timestamp to record for a release happening at `now`.
///
/// Truncated to database precision, then clamped so that
/// `closed_at >= opened_at` holds even under clock skew between request
/// handlers.
pub fn effective_close_time(opened_at: Timestamp, now: Timestamp) -> Timestamp {
    to_db_precision(now).max(opened_at)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::roles::{ROLE_ADMIN, ROLE_USER};

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 5, 10, 18, 30, 0).unwrap()
    }

    #[test]
    fn owner_can_close_open_reservation() {
        let actor = Actor::new(7, ROLE_USER);
        assert!(authorize_close(&actor, 1, 7, None).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let actor = Actor::new(8, ROLE_USER);
        assert_matches!(
            authorize_close(&actor, 1, 7, None),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn admin_cannot_close_someone_elses_reservation() {
        let actor = Actor::new(1, ROLE_ADMIN);
        assert_matches!(
            authorize_close(&actor, 1, 7, None),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn second_close_is_rejected() {
        let actor = Actor::new(7, ROLE_USER);
        assert_matches!(
            authorize_close(&actor, 3, 7, Some(t0())),
            Err(CoreError::AlreadyClosed { reservation_id: 3 })
        );
    }

    #[test]
    fn non_owner_of_closed_reservation_sees_forbidden() {
        let actor = Actor::new(8, ROLE_USER);
        assert_matches!(
            authorize_close(&actor, 3, 7, Some(t0())),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn close_time_never_precedes_open_time() {
        let skewed = t0() - Duration::seconds(5);
        assert_eq!(effective_close_time(t0(), skewed), t0());
        let later = t0() + Duration::minutes(42);
        assert_eq!(effective_close_time(t0(), later), later);
    }

    #[test]
    fn close_time_is_stored_at_microsecond_precision() {
        let now = t0() + Duration::minutes(10) + Duration::nanoseconds(1_500);
        assert_eq!(
            effective_close_time(t0(), now),
            t0() + Duration::minutes(10) + Duration::microseconds(1)
        );
    }

    #[test]
    fn state_follows_close_timestamp() {
        assert_eq!(ReservationState::of(None), ReservationState::Open);
        assert_eq!(ReservationState::of(Some(t0())), ReservationState::Closed);
    }
}
