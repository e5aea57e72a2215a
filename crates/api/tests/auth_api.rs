//! HTTP-level tests for registration, login, token handling and the
//! startup admin bootstrap.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, get, get_auth, post_json, TEST_PASSWORD};
use parkwise_api::bootstrap::ensure_admin;
use parkwise_api::config::AdminBootstrap;
use parkwise_db::repositories::UserRepo;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Register
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_creates_user_role_account(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({ "username": "  priya ", "password": "s3cure-pass" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "priya");
    assert_eq!(json["data"]["role"], "user");
    assert!(json["data"].get("password_hash").is_none());

    let stored = UserRepo::find_by_username(&pool, "priya")
        .await
        .unwrap()
        .unwrap();
    assert!(stored.password_hash.starts_with("$argon2id$"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_username_conflicts(pool: PgPool) {
    create_user(&pool, "taken", "user").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({ "username": "taken", "password": "another-pass" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_rejects_weak_input(pool: PgPool) {
    let app = common::build_test_app(pool);

    for body in [
        json!({ "username": "shortpw", "password": "1234567" }),
        json!({ "username": "ab", "password": "long-enough" }),
    ] {
        let response = post_json(app.clone(), "/api/v1/auth/register", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_returns_usable_token(pool: PgPool) {
    let (user, _) = create_user(&pool, "driver", "user").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "username": "driver", "password": TEST_PASSWORD }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["id"], user.id);
    assert_eq!(json["data"]["user"]["role"], "user");
    assert_eq!(json["data"]["expires_in"], 3600);
    let token = json["data"]["access_token"].as_str().unwrap();

    let response = get_auth(app, "/api/v1/lots", token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_with_bad_credentials_is_401(pool: PgPool) {
    create_user(&pool, "driver", "user").await;
    let app = common::build_test_app(pool);

    for body in [
        json!({ "username": "driver", "password": "wrong-password" }),
        json!({ "username": "nobody", "password": TEST_PASSWORD }),
    ] {
        let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Invalid username or password");
    }
}

// ---------------------------------------------------------------------------
// Token enforcement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_protected_routes_require_valid_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/lots").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/v1/lots", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid or expired token");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_routes_reject_user_role(pool: PgPool) {
    let (_, user_token) = create_user(&pool, "driver", "user").await;
    let (_, admin_token) = create_user(&pool, "boss", "admin").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app.clone(), "/api/v1/admin/users", &user_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, "/api/v1/admin/users", &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let users = json["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_bootstrap_admin_is_idempotent(pool: PgPool) {
    let admin = AdminBootstrap {
        username: "admin".to_string(),
        password: "bootstrap-pass".to_string(),
    };

    assert!(ensure_admin(&pool, &admin).await.unwrap());
    assert!(!ensure_admin(&pool, &admin).await.unwrap());

    let users = UserRepo::list(&pool, None).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].role, "admin");

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "username": "admin", "password": "bootstrap-pass" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
