//! Repository for the `films` table.

use cinebook_core::types::DbId;
use sqlx::PgPool;

use crate::models::film::{CreateFilm, Film, UpdateFilm};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, titre, duree, genre, affiche, description, created_at";

/// Provides CRUD operations for films.
pub struct FilmRepo;

impl FilmRepo {
    /// Insert a new film, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFilm) -> Result<Film, sqlx::Error> {
        let query = format!(
            "INSERT INTO films (titre, duree, genre, affiche, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Film>(&query)
            .bind(&input.titre)
            .bind(input.duree)
            .bind(&input.genre)
            .bind(&input.affiche)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a film by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Film>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM films WHERE id = $1");
        sqlx::query_as::<_, Film>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a film by exact title match.
    pub async fn find_by_titre(pool: &PgPool, titre: &str) -> Result<Option<Film>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM films WHERE titre = $1");
        sqlx::query_as::<_, Film>(&query)
            .bind(titre)
            .fetch_optional(pool)
            .await
    }

    /// List all films, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Film>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM films ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Film>(&query).fetch_all(pool).await
    }

    /// Update a film. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFilm,
    ) -> Result<Option<Film>, sqlx::Error> {
        let query = format!(
            "UPDATE films SET
                titre = COALESCE($2, titre),
                duree = COALESCE($3, duree),
                genre = COALESCE($4, genre),
                affiche = COALESCE($5, affiche),
                description = COALESCE($6, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Film>(&query)
            .bind(id)
            .bind(&input.titre)
            .bind(input.duree)
            .bind(&input.genre)
            .bind(&input.affiche)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a film by ID. Returns `true` if a row was removed.
    ///
    /// Seances of the film (and their reservations) are removed by the
    /// `ON DELETE CASCADE` foreign keys; the upcoming-seance guard lives in
    /// the handler layer.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM films WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
