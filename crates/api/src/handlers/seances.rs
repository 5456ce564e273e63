//! Handlers for the `/seances` resource.
//!
//! Reads are public; mutations require the admin role. The stored `statut`
//! column is advisory: every read path overwrites it with the value computed
//! from (date, heure, now), and only the batch refresh writes it back.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{NaiveDate, Utc};
use cinebook_core::availability::SeatAvailability;
use cinebook_core::error::CoreError;
use cinebook_core::status::{parse_heure, ScreeningStatus};
use cinebook_core::types::DbId;
use cinebook_db::models::seance::{CreateSeance, Seance, SeanceDetail, UpdateSeance};
use cinebook_db::repositories::{
    FilmRepo, ReservationRepo, SalleRepo, SeanceDeleteOutcome, SeanceFilter, SeanceRepo,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Query parameters for `GET /seances`.
///
/// `statut` filters on the live-recomputed value, so it is applied after
/// recomputation rather than pushed into the SQL filter.
#[derive(Debug, Deserialize)]
pub struct ListSeancesParams {
    pub film_id: Option<DbId>,
    pub salle_id: Option<DbId>,
    pub date: Option<NaiveDate>,
    pub statut: Option<String>,
}

/// Verify that a seance exists, returning the raw row.
async fn ensure_seance_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Seance> {
    SeanceRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Séance", id }))
}

/// Verify that the film and salle referenced by a seance exist.
async fn ensure_references_exist(
    pool: &sqlx::PgPool,
    film_id: Option<DbId>,
    salle_id: Option<DbId>,
) -> AppResult<()> {
    if let Some(id) = film_id {
        FilmRepo::find_by_id(pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: "Film", id }))?;
    }
    if let Some(id) = salle_id {
        SalleRepo::find_by_id(pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: "Salle", id }))?;
    }
    Ok(())
}

/// Fetch the joined detail of a seance and overwrite its status live.
async fn load_detail(pool: &sqlx::PgPool, id: DbId) -> AppResult<SeanceDetail> {
    let mut detail = SeanceRepo::find_detail(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Séance", id }))?;
    let status = ScreeningStatus::compute(detail.date, &detail.heure, Utc::now())?;
    detail.statut = status.as_str().to_string();
    Ok(detail)
}

// ---------------------------------------------------------------------------
// GET /seances
// ---------------------------------------------------------------------------

/// List seances with optional filters, joined with film and salle, statuses
/// recomputed live.
pub async fn list_seances(
    State(state): State<AppState>,
    Query(params): Query<ListSeancesParams>,
) -> AppResult<impl IntoResponse> {
    let filter = SeanceFilter {
        film_id: params.film_id,
        salle_id: params.salle_id,
        date: params.date,
    };

    let now = Utc::now();
    let mut seances = Vec::new();
    for mut detail in SeanceRepo::list(&state.pool, &filter).await? {
        let status = ScreeningStatus::compute(detail.date, &detail.heure, now)?;
        detail.statut = status.as_str().to_string();
        seances.push(detail);
    }

    if let Some(ref statut) = params.statut {
        seances.retain(|s| &s.statut == statut);
    }

    tracing::debug!(count = seances.len(), "Listed seances");
    Ok(Json(ApiResponse::list(seances)))
}

// ---------------------------------------------------------------------------
// GET /seances/{id}
// ---------------------------------------------------------------------------

/// Get a seance joined with its film and salle, status recomputed live.
pub async fn get_seance(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = load_detail(&state.pool, id).await?;
    Ok(Json(ApiResponse::data(detail)))
}

// ---------------------------------------------------------------------------
// GET /seances/{id}/disponibilite
// ---------------------------------------------------------------------------

/// Report remaining seats for a seance from the salle capacity and the sum
/// of confirmed reservation seat counts.
pub async fn get_disponibilite(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = SeanceRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Séance", id }))?;

    let reserved = ReservationRepo::sum_confirmed_places(&state.pool, id).await?;
    let availability = SeatAvailability::compute(detail.salle.capacite, reserved);

    Ok(Json(ApiResponse::data(availability)))
}

// ---------------------------------------------------------------------------
// POST /seances
// ---------------------------------------------------------------------------

/// Create a seance after checking that its film and salle exist and its
/// heure is well-formed. Returns the seance joined with film and salle.
pub async fn create_seance(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateSeance>,
) -> AppResult<impl IntoResponse> {
    parse_heure(&input.heure)?;
    ensure_references_exist(&state.pool, Some(input.film_id), Some(input.salle_id)).await?;

    let created = SeanceRepo::create(&state.pool, &input).await?;
    tracing::info!(id = created.id, film_id = created.film_id, "Seance created");

    let detail = load_detail(&state.pool, created.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Séance créée avec succès", detail)),
    ))
}

// ---------------------------------------------------------------------------
// PUT /seances/{id}
// ---------------------------------------------------------------------------

/// Update a seance. Only provided fields replace stored values; changed
/// film/salle references are re-checked for existence.
pub async fn update_seance(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSeance>,
) -> AppResult<impl IntoResponse> {
    ensure_seance_exists(&state.pool, id).await?;

    if let Some(ref heure) = input.heure {
        parse_heure(heure)?;
    }
    ensure_references_exist(&state.pool, input.film_id, input.salle_id).await?;

    SeanceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Séance", id }))?;
    tracing::info!(id, "Seance updated");

    let detail = load_detail(&state.pool, id).await?;
    Ok(Json(ApiResponse::with_message("Séance modifiée avec succès", detail)))
}

// ---------------------------------------------------------------------------
// DELETE /seances/{id}
// ---------------------------------------------------------------------------

/// Delete a seance and its remaining non-confirmed reservations, unless
/// confirmed reservations reference it, in which case the exact count is
/// reported.
pub async fn delete_seance(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    ensure_seance_exists(&state.pool, id).await?;

    match SeanceRepo::delete_with_reservations(&state.pool, id).await? {
        SeanceDeleteOutcome::Blocked { confirmed } => {
            tracing::info!(id, confirmed, "Seance deletion blocked by confirmed reservations");
            let body = json!({
                "success": false,
                "message": format!(
                    "Cette séance a {confirmed} réservation(s) confirmée(s). Suppression impossible."
                ),
                "reservationsCount": confirmed,
            });
            Ok((StatusCode::BAD_REQUEST, Json(body)).into_response())
        }
        SeanceDeleteOutcome::Deleted => {
            tracing::info!(id, "Seance deleted");
            Ok(Json(ApiResponse::message("Séance supprimée avec succès")).into_response())
        }
    }
}

// ---------------------------------------------------------------------------
// GET /seances/update-status
// ---------------------------------------------------------------------------

/// Batch-refresh the advisory `statut` column, rewriting only stale rows.
///
/// The background task runs the same pass on an interval; this endpoint
/// exists so the refresh can also be triggered on demand.
pub async fn update_statuses(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let updated = SeanceRepo::refresh_statuses(&state.pool, Utc::now()).await?;
    tracing::info!(updated, "Seance statuses refreshed");
    Ok(Json(json!({
        "success": true,
        "message": format!("{updated} séances mises à jour"),
        "updated": updated,
    })))
}
