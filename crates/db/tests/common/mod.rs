//! Shared fixtures for database integration tests.

#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use parkwise_core::actor::Actor;
use parkwise_core::roles::{ROLE_ADMIN, ROLE_USER};
use parkwise_core::types::{DbId, Timestamp};
use parkwise_db::models::lot::{CreateLot, LotWithOccupancy};
use parkwise_db::models::user::CreateUser;
use parkwise_db::ops;
use parkwise_db::repositories::{ReservationRepo, SpotRepo, UserRepo};
use rust_decimal::Decimal;
use sqlx::PgPool;

/// A fixed reference instant; tests express times as offsets from it.
pub fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
}

pub fn minutes_after_t0(minutes: i64) -> Timestamp {
    t0() + Duration::minutes(minutes)
}

async fn create_user(pool: &PgPool, username: &str, role: &str) -> Actor {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role: role.to_string(),
        },
    )
    .await
    .unwrap();
    Actor::new(user.id, user.role)
}

pub async fn admin(pool: &PgPool) -> Actor {
    create_user(pool, "admin", ROLE_ADMIN).await
}

pub async fn driver(pool: &PgPool, username: &str) -> Actor {
    create_user(pool, username, ROLE_USER).await
}

pub fn lot_input(name: &str, capacity: i32, price_per_hour: Decimal) -> CreateLot {
    CreateLot {
        name: name.to_string(),
        address: Some("12 Station Road".to_string()),
        city: Some("Pune".to_string()),
        pincode: Some("411001".to_string()),
        capacity,
        price_per_hour,
    }
}

pub async fn create_lot(
    pool: &PgPool,
    admin: &Actor,
    capacity: i32,
    price_per_hour: Decimal,
) -> LotWithOccupancy {
    ops::create_lot(pool, admin, &lot_input("Central", capacity, price_per_hour))
        .await
        .unwrap()
}

/// Occupied spots of a lot must match its open reservations one to one.
pub async fn assert_occupancy_consistent(pool: &PgPool, lot_id: DbId) {
    let counts = SpotRepo::count_by_status(pool, lot_id).await.unwrap();
    let open = ReservationRepo::count_open_for_lot(pool, lot_id).await.unwrap();
    assert_eq!(
        counts.occupied, open,
        "lot {lot_id}: {} occupied spots but {open} open reservations",
        counts.occupied
    );
    assert_eq!(counts.total, counts.available + counts.occupied);
}
