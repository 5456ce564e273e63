//! Reservation entity model.
//!
//! Reservations are written by a separate booking collaborator; this service
//! only aggregates them for availability and cascades them on seance
//! deletion.

use cinebook_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Reservation status value that counts toward occupancy and blocks seance
/// deletion. Any other status is treated as non-confirmed.
pub const STATUT_CONFIRMEE: &str = "confirmée";

/// A row from the `reservations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reservation {
    pub id: DbId,
    pub seance_id: DbId,
    pub nombre_places: i32,
    pub statut: String,
    pub created_at: Timestamp,
}
