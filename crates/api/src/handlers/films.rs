//! Handlers for the `/films` resource.
//!
//! Reads are public; mutations require the admin role. Every seance embedded
//! in a response carries a live-recomputed status, never the stored value.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use cinebook_core::error::CoreError;
use cinebook_core::status::ScreeningStatus;
use cinebook_core::types::DbId;
use cinebook_db::models::film::{CreateFilm, Film, UpdateFilm};
use cinebook_db::models::seance::SeanceWithSalle;
use cinebook_db::repositories::{FilmRepo, SeanceRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Payload for `GET /films/{id}`: the film plus all its seances.
#[derive(Debug, Serialize)]
pub struct FilmDetail {
    pub film: Film,
    pub seances: Vec<SeanceWithSalle>,
}

/// Verify that a film exists, returning the full row.
async fn ensure_film_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Film> {
    FilmRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Film", id }))
}

fn validate_duree(duree: i32) -> AppResult<()> {
    if duree <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "La durée doit être un nombre de minutes positif".into(),
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// GET /films
// ---------------------------------------------------------------------------

/// List all films, newest first.
pub async fn list_films(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let films = FilmRepo::list(&state.pool).await?;
    tracing::debug!(count = films.len(), "Listed films");
    Ok(Json(ApiResponse::list(films)))
}

// ---------------------------------------------------------------------------
// GET /films/{id}
// ---------------------------------------------------------------------------

/// Get a film with all of its seances, statuses recomputed live.
pub async fn get_film(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let film = ensure_film_exists(&state.pool, id).await?;

    let now = Utc::now();
    let mut seances = SeanceRepo::list_by_film_with_salle(&state.pool, id).await?;
    for seance in &mut seances {
        let status = ScreeningStatus::compute(seance.date, &seance.heure, now)?;
        seance.statut = status.as_str().to_string();
    }

    Ok(Json(ApiResponse::data(FilmDetail { film, seances })))
}

// ---------------------------------------------------------------------------
// POST /films
// ---------------------------------------------------------------------------

/// Create a new film. Fails when a film with the exact same title exists.
pub async fn create_film(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateFilm>,
) -> AppResult<impl IntoResponse> {
    validate_duree(input.duree)?;

    if FilmRepo::find_by_titre(&state.pool, &input.titre).await?.is_some() {
        return Err(AppError::Core(CoreError::Validation(
            "Un film avec ce titre existe déjà".into(),
        )));
    }

    let created = FilmRepo::create(&state.pool, &input).await?;
    tracing::info!(id = created.id, titre = %created.titre, "Film created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Film créé avec succès", created)),
    ))
}

// ---------------------------------------------------------------------------
// PUT /films/{id}
// ---------------------------------------------------------------------------

/// Update a film. Only provided fields replace stored values; a changed
/// title is re-checked for uniqueness against other films.
pub async fn update_film(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFilm>,
) -> AppResult<impl IntoResponse> {
    let film = ensure_film_exists(&state.pool, id).await?;

    if let Some(duree) = input.duree {
        validate_duree(duree)?;
    }

    if let Some(ref titre) = input.titre {
        if titre != &film.titre && FilmRepo::find_by_titre(&state.pool, titre).await?.is_some() {
            return Err(AppError::Core(CoreError::Validation(
                "Un film avec ce titre existe déjà".into(),
            )));
        }
    }

    let updated = FilmRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Film", id }))?;
    tracing::info!(id = updated.id, "Film updated");
    Ok(Json(ApiResponse::with_message("Film modifié avec succès", updated)))
}

// ---------------------------------------------------------------------------
// DELETE /films/{id}
// ---------------------------------------------------------------------------

/// Delete a film unless one of its seances is still upcoming.
///
/// The guard recomputes each seance's status live instead of trusting the
/// stored column, so a stale cache can neither block nor allow a deletion
/// incorrectly.
pub async fn delete_film(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_film_exists(&state.pool, id).await?;

    let now = Utc::now();
    let seances = SeanceRepo::list_by_film(&state.pool, id).await?;
    for seance in &seances {
        if ScreeningStatus::compute(seance.date, &seance.heure, now)? == ScreeningStatus::AVenir {
            return Err(AppError::Core(CoreError::Conflict(
                "Impossible de supprimer ce film. Il a des séances à venir.".into(),
            )));
        }
    }

    FilmRepo::delete(&state.pool, id).await?;
    tracing::info!(id, "Film deleted");
    Ok(Json(ApiResponse::message("Film supprimé avec succès")))
}
