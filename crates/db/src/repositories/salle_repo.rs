//! Repository for the `salles` table.

use cinebook_core::types::DbId;
use sqlx::PgPool;

use crate::models::salle::{CreateSalle, Salle};

const COLUMNS: &str = "id, nom, capacite, created_at";

/// Read access to salles; rows are created by seeding, never by this API.
pub struct SalleRepo;

impl SalleRepo {
    /// Insert a new salle, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSalle) -> Result<Salle, sqlx::Error> {
        let query = format!(
            "INSERT INTO salles (nom, capacite) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Salle>(&query)
            .bind(&input.nom)
            .bind(input.capacite)
            .fetch_one(pool)
            .await
    }

    /// Find a salle by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Salle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM salles WHERE id = $1");
        sqlx::query_as::<_, Salle>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
