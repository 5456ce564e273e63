//! Shared helpers for HTTP-level integration tests.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the router
//! without an actual TCP listener, mirroring the router construction in
//! `main.rs` so tests exercise the same middleware stack production uses.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use cinebook_api::auth::jwt::{generate_access_token, JwtConfig};
use cinebook_api::auth::password::hash_password;
use cinebook_api::config::ServerConfig;
use cinebook_api::router::build_app_router;
use cinebook_api::state::AppState;
use cinebook_core::roles::{ROLE_ADMIN, ROLE_USER};
use cinebook_core::types::DbId;
use cinebook_db::models::film::{CreateFilm, Film};
use cinebook_db::models::salle::{CreateSalle, Salle};
use cinebook_db::models::seance::{CreateSeance, Seance};
use cinebook_db::repositories::{FilmRepo, SalleRepo, SeanceRepo, UserRepo};

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        status_refresh_interval_secs: 60,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, "GET", uri, None, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    send(app, "POST", uri, Some(body), token).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    send(app, "PUT", uri, Some(body), token).await
}

pub async fn delete(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, "DELETE", uri, None, token).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the standard error envelope: `success: false` plus a message.
pub async fn assert_error_envelope(response: Response<Body>, status: StatusCode) -> String {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    json["message"].as_str().expect("error message").to_string()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Seed an admin user and return a valid access token for it.
pub async fn seed_admin_token(pool: &PgPool) -> String {
    let hash = hash_password("admin-password").expect("hashing should succeed");
    let user = UserRepo::create(pool, "admin", &hash, ROLE_ADMIN)
        .await
        .expect("seeding admin should succeed");
    generate_access_token(user.id, ROLE_ADMIN, &test_config().jwt)
        .expect("token generation should succeed")
}

/// Seed a non-admin user and return a valid access token for it.
pub async fn seed_user_token(pool: &PgPool) -> String {
    let hash = hash_password("user-password").expect("hashing should succeed");
    let user = UserRepo::create(pool, "spectator", &hash, ROLE_USER)
        .await
        .expect("seeding user should succeed");
    generate_access_token(user.id, ROLE_USER, &test_config().jwt)
        .expect("token generation should succeed")
}

pub async fn seed_film(pool: &PgPool, titre: &str) -> Film {
    FilmRepo::create(
        pool,
        &CreateFilm {
            titre: titre.to_string(),
            duree: 120,
            genre: "Drame".to_string(),
            affiche: None,
            description: None,
        },
    )
    .await
    .expect("seeding film should succeed")
}

pub async fn seed_salle(pool: &PgPool, capacite: i32) -> Salle {
    SalleRepo::create(
        pool,
        &CreateSalle {
            nom: "Salle 1".to_string(),
            capacite,
        },
    )
    .await
    .expect("seeding salle should succeed")
}

pub async fn seed_seance(
    pool: &PgPool,
    film_id: DbId,
    salle_id: DbId,
    date: NaiveDate,
    heure: &str,
) -> Seance {
    SeanceRepo::create(
        pool,
        &CreateSeance {
            film_id,
            salle_id,
            date,
            heure: heure.to_string(),
        },
    )
    .await
    .expect("seeding seance should succeed")
}

/// Yesterday's date: any seance on it is "terminée".
pub fn past_date() -> NaiveDate {
    chrono::Utc::now().date_naive() - chrono::Duration::days(1)
}

/// Tomorrow's date: any seance on it is "à venir".
pub fn future_date() -> NaiveDate {
    chrono::Utc::now().date_naive() + chrono::Duration::days(1)
}
