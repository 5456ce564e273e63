//! HTTP-level integration tests for the `/api/v1/films` resource.

mod common;

use axum::http::StatusCode;
use common::*;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// GET /films
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_films_returns_empty_list(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(app, "/api/v1/films").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 0);
    assert_eq!(json["data"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_films_returns_newest_first(pool: PgPool) {
    seed_film(&pool, "Premier film").await;
    seed_film(&pool, "Deuxième film").await;
    let app = build_test_app(pool);

    let response = get(app, "/api/v1/films").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["data"][0]["titre"], "Deuxième film");
    assert_eq!(json["data"][1]["titre"], "Premier film");
}

// ---------------------------------------------------------------------------
// GET /films/{id}
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn get_film_returns_film_with_seances(pool: PgPool) {
    let film = seed_film(&pool, "Interstellar").await;
    let salle = seed_salle(&pool, 100).await;
    seed_seance(&pool, film.id, salle.id, future_date(), "20:30").await;
    let app = build_test_app(pool);

    let response = get(app, &format!("/api/v1/films/{}", film.id)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["film"]["titre"], "Interstellar");
    assert_eq!(json["data"]["seances"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["seances"][0]["heure"], "20:30");
    assert_eq!(json["data"]["seances"][0]["salle"]["capacite"], 100);
}

/// The stored statut column is ignored: a past seance reports "terminée"
/// even when the column still says "à venir".
#[sqlx::test(migrations = "../db/migrations")]
async fn get_film_recomputes_seance_status_live(pool: PgPool) {
    let film = seed_film(&pool, "Vieux film").await;
    let salle = seed_salle(&pool, 50).await;
    // Inserted with the column default "à venir", but the date is past.
    seed_seance(&pool, film.id, salle.id, past_date(), "10:00").await;
    let app = build_test_app(pool);

    let response = get(app, &format!("/api/v1/films/{}", film.id)).await;

    let json = body_json(response).await;
    assert_eq!(json["data"]["seances"][0]["statut"], "terminée");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_missing_film_returns_404(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(app, "/api/v1/films/9999").await;

    let message = assert_error_envelope(response, StatusCode::NOT_FOUND).await;
    assert!(message.contains("introuvable"));
}

// ---------------------------------------------------------------------------
// POST /films
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_film_returns_201(pool: PgPool) {
    let token = seed_admin_token(&pool).await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/films",
        serde_json::json!({
            "titre": "Dune",
            "duree": 155,
            "genre": "Science-fiction",
            "description": "Adaptation du roman de Frank Herbert"
        }),
        Some(&token),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Film créé avec succès");
    assert_eq!(json["data"]["titre"], "Dune");
    assert_eq!(json["data"]["duree"], 155);
    assert!(json["data"]["id"].is_i64());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_film_rejects_duplicate_titre(pool: PgPool) {
    let token = seed_admin_token(&pool).await;
    seed_film(&pool, "Dune").await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/films",
        serde_json::json!({ "titre": "Dune", "duree": 155, "genre": "Science-fiction" }),
        Some(&token),
    )
    .await;

    let message = assert_error_envelope(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(message, "Un film avec ce titre existe déjà");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_film_rejects_non_positive_duree(pool: PgPool) {
    let token = seed_admin_token(&pool).await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/films",
        serde_json::json!({ "titre": "Court", "duree": 0, "genre": "Drame" }),
        Some(&token),
    )
    .await;

    assert_error_envelope(response, StatusCode::BAD_REQUEST).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_film_without_token_returns_401(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/films",
        serde_json::json!({ "titre": "Dune", "duree": 155, "genre": "Science-fiction" }),
        None,
    )
    .await;

    assert_error_envelope(response, StatusCode::UNAUTHORIZED).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_film_as_non_admin_returns_403(pool: PgPool) {
    let token = seed_user_token(&pool).await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/films",
        serde_json::json!({ "titre": "Dune", "duree": 155, "genre": "Science-fiction" }),
        Some(&token),
    )
    .await;

    assert_error_envelope(response, StatusCode::FORBIDDEN).await;
}

// ---------------------------------------------------------------------------
// PUT /films/{id}
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn update_film_replaces_only_provided_fields(pool: PgPool) {
    let token = seed_admin_token(&pool).await;
    let film = seed_film(&pool, "Titre provisoire").await;
    let app = build_test_app(pool);

    let response = put_json(
        app,
        &format!("/api/v1/films/{}", film.id),
        serde_json::json!({ "titre": "Titre définitif" }),
        Some(&token),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Film modifié avec succès");
    assert_eq!(json["data"]["titre"], "Titre définitif");
    // Untouched fields keep their stored values.
    assert_eq!(json["data"]["duree"], 120);
    assert_eq!(json["data"]["genre"], "Drame");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_film_rejects_titre_taken_by_another_film(pool: PgPool) {
    let token = seed_admin_token(&pool).await;
    seed_film(&pool, "Alien").await;
    let film = seed_film(&pool, "Aliens").await;
    let app = build_test_app(pool);

    let response = put_json(
        app,
        &format!("/api/v1/films/{}", film.id),
        serde_json::json!({ "titre": "Alien" }),
        Some(&token),
    )
    .await;

    let message = assert_error_envelope(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(message, "Un film avec ce titre existe déjà");
}

/// Re-sending a film's own titre is not a duplicate.
#[sqlx::test(migrations = "../db/migrations")]
async fn update_film_accepts_unchanged_titre(pool: PgPool) {
    let token = seed_admin_token(&pool).await;
    let film = seed_film(&pool, "Alien").await;
    let app = build_test_app(pool);

    let response = put_json(
        app,
        &format!("/api/v1/films/{}", film.id),
        serde_json::json!({ "titre": "Alien", "duree": 117 }),
        Some(&token),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["duree"], 117);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_missing_film_returns_404(pool: PgPool) {
    let token = seed_admin_token(&pool).await;
    let app = build_test_app(pool);

    let response = put_json(
        app,
        "/api/v1/films/9999",
        serde_json::json!({ "titre": "Fantôme" }),
        Some(&token),
    )
    .await;

    assert_error_envelope(response, StatusCode::NOT_FOUND).await;
}

// ---------------------------------------------------------------------------
// DELETE /films/{id}
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_film_without_seances_succeeds(pool: PgPool) {
    let token = seed_admin_token(&pool).await;
    let film = seed_film(&pool, "Éphémère").await;
    let app = build_test_app(pool.clone());

    let response = delete(app, &format!("/api/v1/films/{}", film.id), Some(&token)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Film supprimé avec succès");

    let listed = cinebook_db::repositories::FilmRepo::list(&pool).await.unwrap();
    assert!(listed.is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_film_with_upcoming_seance_is_blocked(pool: PgPool) {
    let token = seed_admin_token(&pool).await;
    let film = seed_film(&pool, "À l'affiche").await;
    let salle = seed_salle(&pool, 80).await;
    seed_seance(&pool, film.id, salle.id, future_date(), "18:00").await;
    let app = build_test_app(pool);

    let response = delete(app, &format!("/api/v1/films/{}", film.id), Some(&token)).await;

    let message = assert_error_envelope(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(
        message,
        "Impossible de supprimer ce film. Il a des séances à venir."
    );
}

/// The deletion guard recomputes statuses live: a past seance whose stored
/// statut still says "à venir" must not block deletion.
#[sqlx::test(migrations = "../db/migrations")]
async fn delete_film_with_only_past_seances_succeeds(pool: PgPool) {
    let token = seed_admin_token(&pool).await;
    let film = seed_film(&pool, "Rétrospective").await;
    let salle = seed_salle(&pool, 80).await;
    // Stored statut defaults to "à venir" and is never refreshed here.
    let seance = seed_seance(&pool, film.id, salle.id, past_date(), "14:00").await;
    assert_eq!(seance.statut, "à venir");
    let app = build_test_app(pool.clone());

    let response = delete(app, &format!("/api/v1/films/{}", film.id), Some(&token)).await;

    assert_eq!(response.status(), StatusCode::OK);

    // The seance is gone with the film (cascade).
    let remaining = cinebook_db::repositories::SeanceRepo::list_by_film(&pool, film.id)
        .await
        .unwrap();
    assert!(remaining.is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_missing_film_returns_404(pool: PgPool) {
    let token = seed_admin_token(&pool).await;
    let app = build_test_app(pool);

    let response = delete(app, "/api/v1/films/9999", Some(&token)).await;

    assert_error_envelope(response, StatusCode::NOT_FOUND).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_film_without_token_returns_401(pool: PgPool) {
    let film = seed_film(&pool, "Protégé").await;
    let app = build_test_app(pool);

    let response = delete(app, &format!("/api/v1/films/{}", film.id), None).await;

    assert_error_envelope(response, StatusCode::UNAUTHORIZED).await;
}
