//! Salle (screening room) entity model.
//!
//! Salles are referenced by seances but never mutated through this API, so
//! there are no update DTOs; the create DTO exists for seeding and tests.

use cinebook_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `salles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Salle {
    pub id: DbId,
    pub nom: String,
    /// Seat capacity, always > 0 (schema CHECK).
    pub capacite: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a salle.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSalle {
    pub nom: String,
    pub capacite: i32,
}
