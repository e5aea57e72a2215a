//! Integration tests for lot capacity adjustment and release-time
//! reconciliation.

mod common;

use assert_matches::assert_matches;
use common::{admin, assert_occupancy_consistent, create_lot, driver, minutes_after_t0, t0};
use parkwise_core::error::CoreError;
use parkwise_core::spot::SpotStatus;
use parkwise_db::error::OpError;
use parkwise_db::models::lot::UpdateLot;
use parkwise_db::ops;
use parkwise_db::repositories::{LotRepo, SpotRepo};
use rust_decimal_macros::dec;
use sqlx::PgPool;

fn capacity(value: i32) -> UpdateLot {
    UpdateLot {
        capacity: Some(value),
        ..Default::default()
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_shrink_removes_only_available_spots(pool: PgPool) {
    let admin = admin(&pool).await;
    let alice = driver(&pool, "alice").await;
    let bob = driver(&pool, "bob").await;
    let lot = create_lot(&pool, &admin, 5, dec!(10)).await;
    let lot_id = lot.lot.id;

    let a = ops::allocate_spot(&pool, &alice, lot_id, t0()).await.unwrap();
    let b = ops::allocate_spot(&pool, &bob, lot_id, t0()).await.unwrap();

    let adjustment = ops::edit_lot(&pool, &admin, lot_id, &capacity(2))
        .await
        .unwrap();

    assert_eq!(adjustment.capacity.spots_removed.len(), 3);
    assert_eq!(adjustment.capacity.spots_added, 0);
    assert_eq!(adjustment.capacity.spot_count, 2);
    assert!(adjustment.capacity.is_converged());
    assert_eq!(adjustment.lot.lot.capacity, 2);
    assert_eq!(adjustment.lot.spot_count, 2);
    assert_eq!(adjustment.lot.occupied_spots, 2);
    assert_eq!(adjustment.lot.available_spots, 0);

    let remaining: Vec<_> = SpotRepo::list_by_lot(&pool, lot_id)
        .await
        .unwrap()
        .into_iter()
        .map(|s| (s.id, s.status))
        .collect();
    assert_eq!(
        remaining,
        vec![
            (a.spot_id.unwrap(), SpotStatus::Occupied),
            (b.spot_id.unwrap(), SpotStatus::Occupied),
        ]
    );
    assert_occupancy_consistent(&pool, lot_id).await;
}

#[sqlx::test(migrations = "./migrations")]
async fn test_shrink_prefers_lowest_available_ids(pool: PgPool) {
    let admin = admin(&pool).await;
    let lot = create_lot(&pool, &admin, 4, dec!(10)).await;
    let before: Vec<_> = SpotRepo::list_by_lot(&pool, lot.lot.id)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();

    let adjustment = ops::edit_lot(&pool, &admin, lot.lot.id, &capacity(1))
        .await
        .unwrap();

    assert_eq!(adjustment.capacity.spots_removed, before[..3].to_vec());
    let after = SpotRepo::list_by_lot(&pool, lot.lot.id).await.unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].id, before[3]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_blocked_shrink_converges_as_spots_are_released(pool: PgPool) {
    let admin = admin(&pool).await;
    let users = [
        driver(&pool, "u1").await,
        driver(&pool, "u2").await,
        driver(&pool, "u3").await,
    ];
    let lot = create_lot(&pool, &admin, 3, dec!(10)).await;
    let lot_id = lot.lot.id;

    let mut reservations = Vec::new();
    for user in &users {
        reservations.push(ops::allocate_spot(&pool, user, lot_id, t0()).await.unwrap());
    }

    let adjustment = ops::edit_lot(&pool, &admin, lot_id, &capacity(1))
        .await
        .unwrap();
    assert!(adjustment.capacity.spots_removed.is_empty());
    assert_eq!(adjustment.capacity.spot_count, 3);
    assert_eq!(adjustment.capacity.divergence, 2);
    assert_eq!(adjustment.lot.lot.capacity, 1);

    let first = ops::release_spot(&pool, &users[0], reservations[0].id, minutes_after_t0(60))
        .await
        .unwrap();
    assert_eq!(first.reconciled_spots, vec![reservations[0].spot_id.unwrap()]);
    let counts = SpotRepo::count_by_status(&pool, lot_id).await.unwrap();
    assert_eq!(counts.total, 2);

    let second = ops::release_spot(&pool, &users[1], reservations[1].id, minutes_after_t0(60))
        .await
        .unwrap();
    assert_eq!(second.reconciled_spots, vec![reservations[1].spot_id.unwrap()]);

    let counts = SpotRepo::count_by_status(&pool, lot_id).await.unwrap();
    assert_eq!(counts.total, 1);
    assert_eq!(counts.occupied, 1);
    let lot = LotRepo::find_by_id(&pool, lot_id).await.unwrap().unwrap();
    assert_eq!(i64::from(lot.capacity), counts.total);

    // Converged: the last release keeps the spot.
    let third = ops::release_spot(&pool, &users[2], reservations[2].id, minutes_after_t0(60))
        .await
        .unwrap();
    assert!(third.reconciled_spots.is_empty());
    let counts = SpotRepo::count_by_status(&pool, lot_id).await.unwrap();
    assert_eq!((counts.total, counts.available), (1, 1));
    assert_occupancy_consistent(&pool, lot_id).await;
}

#[sqlx::test(migrations = "./migrations")]
async fn test_grow_appends_available_spots(pool: PgPool) {
    let admin = admin(&pool).await;
    let lot = create_lot(&pool, &admin, 3, dec!(10)).await;
    let before = SpotRepo::list_by_lot(&pool, lot.lot.id).await.unwrap();
    let max_before = before.iter().map(|s| s.id).max().unwrap();

    let adjustment = ops::edit_lot(&pool, &admin, lot.lot.id, &capacity(5))
        .await
        .unwrap();

    assert_eq!(adjustment.capacity.spots_added, 2);
    assert_eq!(adjustment.capacity.spot_count, 5);
    assert_eq!(adjustment.lot.available_spots, 5);
    let after = SpotRepo::list_by_lot(&pool, lot.lot.id).await.unwrap();
    let new_ids: Vec<_> = after.iter().filter(|s| s.id > max_before).collect();
    assert_eq!(new_ids.len(), 2);
    assert!(new_ids.iter().all(|s| s.status == SpotStatus::Available));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_same_capacity_is_a_noop(pool: PgPool) {
    let admin = admin(&pool).await;
    let lot = create_lot(&pool, &admin, 3, dec!(10)).await;

    let adjustment = ops::edit_lot(&pool, &admin, lot.lot.id, &capacity(3))
        .await
        .unwrap();

    assert_eq!(adjustment.capacity.spots_added, 0);
    assert!(adjustment.capacity.spots_removed.is_empty());
    assert_eq!(adjustment.lot.spot_count, 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_edit_without_capacity_keeps_spots(pool: PgPool) {
    let admin = admin(&pool).await;
    let lot = create_lot(&pool, &admin, 2, dec!(10)).await;

    let adjustment = ops::edit_lot(
        &pool,
        &admin,
        lot.lot.id,
        &UpdateLot {
            name: Some("  Riverside  ".to_string()),
            city: Some("   ".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(adjustment.lot.lot.name, "Riverside");
    assert_eq!(adjustment.lot.lot.city.as_deref(), Some("Pune"));
    assert_eq!(adjustment.lot.spot_count, 2);
    assert_eq!(adjustment.capacity.divergence, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_edit_rejects_bad_capacity_and_non_admins(pool: PgPool) {
    let admin = admin(&pool).await;
    let alice = driver(&pool, "alice").await;
    let lot = create_lot(&pool, &admin, 2, dec!(10)).await;

    let err = ops::edit_lot(&pool, &admin, lot.lot.id, &capacity(0))
        .await
        .unwrap_err();
    assert_matches!(err, OpError::Core(CoreError::Validation(_)));

    let err = ops::edit_lot(&pool, &alice, lot.lot.id, &capacity(5))
        .await
        .unwrap_err();
    assert_matches!(err, OpError::Core(CoreError::Forbidden(_)));

    let err = ops::edit_lot(&pool, &admin, 999_999, &capacity(5))
        .await
        .unwrap_err();
    assert_matches!(err, OpError::Core(CoreError::NotFound { entity: "Lot", .. }));

    let counts = SpotRepo::count_by_status(&pool, lot.lot.id).await.unwrap();
    assert_eq!(counts.total, 2);
}
