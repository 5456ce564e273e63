//! Seance (screening) entity model and DTOs.

use chrono::NaiveDate;
use cinebook_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::film::Film;
use crate::models::salle::Salle;

/// A row from the `seances` table.
///
/// `statut` is the advisory cached value; callers presenting a seance must
/// overwrite it with [`cinebook_core::status::ScreeningStatus::compute`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Seance {
    pub id: DbId,
    pub film_id: DbId,
    pub salle_id: DbId,
    pub date: NaiveDate,
    /// Zero-padded "HH:MM", validated at the API boundary.
    pub heure: String,
    pub statut: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new seance.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSeance {
    pub film_id: DbId,
    pub salle_id: DbId,
    pub date: NaiveDate,
    pub heure: String,
}

/// DTO for updating an existing seance. Only provided fields replace stored
/// values; absent fields are left untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSeance {
    pub film_id: Option<DbId>,
    pub salle_id: Option<DbId>,
    pub date: Option<NaiveDate>,
    pub heure: Option<String>,
}

/// A seance joined with its film and salle, as returned by detail reads and
/// mutations.
#[derive(Debug, Clone, Serialize)]
pub struct SeanceDetail {
    pub id: DbId,
    pub film: Film,
    pub salle: Salle,
    pub date: NaiveDate,
    pub heure: String,
    pub statut: String,
    pub created_at: Timestamp,
}

/// A seance joined with its salle only, embedded in the film detail payload.
#[derive(Debug, Clone, Serialize)]
pub struct SeanceWithSalle {
    pub id: DbId,
    pub film_id: DbId,
    pub salle: Salle,
    pub date: NaiveDate,
    pub heure: String,
    pub statut: String,
    pub created_at: Timestamp,
}
