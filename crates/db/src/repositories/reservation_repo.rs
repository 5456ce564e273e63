//! Repository for the `reservations` table.
//!
//! Reservation rows are written by the booking collaborator; this service
//! aggregates them and inserts fixture rows in tests.

use cinebook_core::types::DbId;
use sqlx::PgPool;

use crate::models::reservation::{Reservation, STATUT_CONFIRMEE};

/// Aggregation and fixture operations for reservations.
pub struct ReservationRepo;

impl ReservationRepo {
    /// Insert a reservation, returning the created row.
    pub async fn create(
        pool: &PgPool,
        seance_id: DbId,
        nombre_places: i32,
        statut: &str,
    ) -> Result<Reservation, sqlx::Error> {
        sqlx::query_as::<_, Reservation>(
            "INSERT INTO reservations (seance_id, nombre_places, statut)
             VALUES ($1, $2, $3)
             RETURNING id, seance_id, nombre_places, statut, created_at",
        )
        .bind(seance_id)
        .bind(nombre_places)
        .bind(statut)
        .fetch_one(pool)
        .await
    }

    /// Sum the seat counts of confirmed reservations for a seance.
    ///
    /// Returns 0 when the seance has no confirmed reservations.
    pub async fn sum_confirmed_places(pool: &PgPool, seance_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(nombre_places), 0)
             FROM reservations
             WHERE seance_id = $1 AND statut = $2",
        )
        .bind(seance_id)
        .bind(STATUT_CONFIRMEE)
        .fetch_one(pool)
        .await
    }

    /// Count the confirmed reservations referencing a seance.
    pub async fn count_confirmed(pool: &PgPool, seance_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM reservations WHERE seance_id = $1 AND statut = $2",
        )
        .bind(seance_id)
        .bind(STATUT_CONFIRMEE)
        .fetch_one(pool)
        .await
    }
}
