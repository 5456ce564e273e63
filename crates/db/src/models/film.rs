//! Film entity model and DTOs.

use cinebook_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `films` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Film {
    pub id: DbId,
    pub titre: String,
    /// Running time in minutes.
    pub duree: i32,
    pub genre: String,
    /// Poster URL.
    pub affiche: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new film.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFilm {
    pub titre: String,
    pub duree: i32,
    pub genre: String,
    pub affiche: Option<String>,
    pub description: Option<String>,
}

/// DTO for updating an existing film. All fields are optional; absent fields
/// keep their stored value.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFilm {
    pub titre: Option<String>,
    pub duree: Option<i32>,
    pub genre: Option<String>,
    pub affiche: Option<String>,
    pub description: Option<String>,
}
