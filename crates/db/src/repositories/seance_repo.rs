//! Repository for the `seances` table.

use chrono::NaiveDate;
use cinebook_core::status::ScreeningStatus;
use cinebook_core::types::{DbId, Timestamp};
use sqlx::{FromRow, PgPool};

use crate::models::film::Film;
use crate::models::reservation::STATUT_CONFIRMEE;
use crate::models::salle::Salle;
use crate::models::seance::{CreateSeance, Seance, SeanceDetail, SeanceWithSalle, UpdateSeance};

const COLUMNS: &str = "id, film_id, salle_id, date, heure, statut, created_at";

/// Column list for seance + film + salle joins. Aliased so the flat row
/// struct can be assembled into the nested detail payload.
const JOINED_COLUMNS: &str = "\
    s.id, s.film_id, s.salle_id, s.date, s.heure, s.statut, s.created_at, \
    f.titre AS film_titre, f.duree AS film_duree, f.genre AS film_genre, \
    f.affiche AS film_affiche, f.description AS film_description, \
    f.created_at AS film_created_at, \
    r.nom AS salle_nom, r.capacite AS salle_capacite, r.created_at AS salle_created_at";

/// Flat row produced by the seance/film/salle join.
#[derive(Debug, FromRow)]
struct SeanceJoinedRow {
    id: DbId,
    film_id: DbId,
    salle_id: DbId,
    date: NaiveDate,
    heure: String,
    statut: String,
    created_at: Timestamp,
    film_titre: String,
    film_duree: i32,
    film_genre: String,
    film_affiche: Option<String>,
    film_description: Option<String>,
    film_created_at: Timestamp,
    salle_nom: String,
    salle_capacite: i32,
    salle_created_at: Timestamp,
}

impl SeanceJoinedRow {
    fn into_detail(self) -> SeanceDetail {
        SeanceDetail {
            id: self.id,
            film: Film {
                id: self.film_id,
                titre: self.film_titre,
                duree: self.film_duree,
                genre: self.film_genre,
                affiche: self.film_affiche,
                description: self.film_description,
                created_at: self.film_created_at,
            },
            salle: Salle {
                id: self.salle_id,
                nom: self.salle_nom,
                capacite: self.salle_capacite,
                created_at: self.salle_created_at,
            },
            date: self.date,
            heure: self.heure,
            statut: self.statut,
            created_at: self.created_at,
        }
    }
}

/// Flat row for the seance + salle join used by the film detail payload.
#[derive(Debug, FromRow)]
struct SeanceSalleRow {
    id: DbId,
    film_id: DbId,
    salle_id: DbId,
    date: NaiveDate,
    heure: String,
    statut: String,
    created_at: Timestamp,
    salle_nom: String,
    salle_capacite: i32,
    salle_created_at: Timestamp,
}

impl SeanceSalleRow {
    fn into_with_salle(self) -> SeanceWithSalle {
        SeanceWithSalle {
            id: self.id,
            film_id: self.film_id,
            salle: Salle {
                id: self.salle_id,
                nom: self.salle_nom,
                capacite: self.salle_capacite,
                created_at: self.salle_created_at,
            },
            date: self.date,
            heure: self.heure,
            statut: self.statut,
            created_at: self.created_at,
        }
    }
}

/// Optional filters for [`SeanceRepo::list`].
///
/// The `statut` query parameter is applied by the handler after live status
/// recomputation, so it does not appear here.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeanceFilter {
    pub film_id: Option<DbId>,
    pub salle_id: Option<DbId>,
    pub date: Option<NaiveDate>,
}

/// Outcome of a guarded seance deletion.
#[derive(Debug, PartialEq, Eq)]
pub enum SeanceDeleteOutcome {
    /// The seance and its remaining non-confirmed reservations were removed.
    Deleted,
    /// Deletion refused: `confirmed` confirmed reservations reference the
    /// seance.
    Blocked { confirmed: i64 },
}

/// Provides CRUD, join and batch-refresh operations for seances.
pub struct SeanceRepo;

impl SeanceRepo {
    /// Insert a new seance, returning the created row (unjoined).
    pub async fn create(pool: &PgPool, input: &CreateSeance) -> Result<Seance, sqlx::Error> {
        let query = format!(
            "INSERT INTO seances (film_id, salle_id, date, heure)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Seance>(&query)
            .bind(input.film_id)
            .bind(input.salle_id)
            .bind(input.date)
            .bind(&input.heure)
            .fetch_one(pool)
            .await
    }

    /// Find a seance by its internal ID (unjoined).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Seance>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seances WHERE id = $1");
        sqlx::query_as::<_, Seance>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a seance joined with its film and salle.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<SeanceDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM seances s
             JOIN films f ON f.id = s.film_id
             JOIN salles r ON r.id = s.salle_id
             WHERE s.id = $1"
        );
        let row = sqlx::query_as::<_, SeanceJoinedRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(SeanceJoinedRow::into_detail))
    }

    /// List seances joined with film and salle, ordered by date then heure.
    ///
    /// Each filter field narrows the result when present.
    pub async fn list(
        pool: &PgPool,
        filter: &SeanceFilter,
    ) -> Result<Vec<SeanceDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM seances s
             JOIN films f ON f.id = s.film_id
             JOIN salles r ON r.id = s.salle_id
             WHERE ($1::BIGINT IS NULL OR s.film_id = $1)
               AND ($2::BIGINT IS NULL OR s.salle_id = $2)
               AND ($3::DATE IS NULL OR s.date = $3)
             ORDER BY s.date ASC, s.heure ASC"
        );
        let rows = sqlx::query_as::<_, SeanceJoinedRow>(&query)
            .bind(filter.film_id)
            .bind(filter.salle_id)
            .bind(filter.date)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(SeanceJoinedRow::into_detail).collect())
    }

    /// List the seances of a film joined with their salle, ordered by date
    /// then heure. Feeds the film detail payload.
    pub async fn list_by_film_with_salle(
        pool: &PgPool,
        film_id: DbId,
    ) -> Result<Vec<SeanceWithSalle>, sqlx::Error> {
        let rows = sqlx::query_as::<_, SeanceSalleRow>(
            "SELECT s.id, s.film_id, s.salle_id, s.date, s.heure, s.statut, s.created_at,
                    r.nom AS salle_nom, r.capacite AS salle_capacite,
                    r.created_at AS salle_created_at
             FROM seances s
             JOIN salles r ON r.id = s.salle_id
             WHERE s.film_id = $1
             ORDER BY s.date ASC, s.heure ASC",
        )
        .bind(film_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(SeanceSalleRow::into_with_salle).collect())
    }

    /// List the raw seance rows of a film. Used by the film deletion guard
    /// to recompute statuses without joining.
    pub async fn list_by_film(pool: &PgPool, film_id: DbId) -> Result<Vec<Seance>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seances WHERE film_id = $1");
        sqlx::query_as::<_, Seance>(&query)
            .bind(film_id)
            .fetch_all(pool)
            .await
    }

    /// Update a seance. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSeance,
    ) -> Result<Option<Seance>, sqlx::Error> {
        let query = format!(
            "UPDATE seances SET
                film_id = COALESCE($2, film_id),
                salle_id = COALESCE($3, salle_id),
                date = COALESCE($4, date),
                heure = COALESCE($5, heure)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Seance>(&query)
            .bind(id)
            .bind(input.film_id)
            .bind(input.salle_id)
            .bind(input.date)
            .bind(&input.heure)
            .fetch_optional(pool)
            .await
    }

    /// Delete a seance unless confirmed reservations reference it.
    ///
    /// The guard check, the cleanup of remaining non-confirmed reservations
    /// and the seance delete run in one transaction so a reservation
    /// confirmed concurrently cannot slip between the check and the delete.
    pub async fn delete_with_reservations(
        pool: &PgPool,
        id: DbId,
    ) -> Result<SeanceDeleteOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let confirmed: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservations WHERE seance_id = $1 AND statut = $2",
        )
        .bind(id)
        .bind(STATUT_CONFIRMEE)
        .fetch_one(&mut *tx)
        .await?;

        if confirmed > 0 {
            tx.rollback().await?;
            return Ok(SeanceDeleteOutcome::Blocked { confirmed });
        }

        sqlx::query("DELETE FROM reservations WHERE seance_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM seances WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(SeanceDeleteOutcome::Deleted)
    }

    /// Recompute every seance's status and persist only the rows whose
    /// stored value differs. Returns the number of rows rewritten.
    ///
    /// This is the sole writer of the advisory `statut` column. Rows with an
    /// unparseable `heure` (pre-validation legacy data) are skipped with a
    /// warning rather than aborting the whole pass.
    pub async fn refresh_statuses(
        pool: &PgPool,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seances");
        let seances = sqlx::query_as::<_, Seance>(&query).fetch_all(pool).await?;

        let mut updated = 0u64;
        for seance in seances {
            let computed = match ScreeningStatus::compute(seance.date, &seance.heure, now) {
                Ok(status) => status,
                Err(e) => {
                    tracing::warn!(seance_id = seance.id, error = %e, "Skipping seance with invalid heure");
                    continue;
                }
            };

            if seance.statut != computed.as_str() {
                sqlx::query("UPDATE seances SET statut = $2 WHERE id = $1")
                    .bind(seance.id)
                    .bind(computed.as_str())
                    .execute(pool)
                    .await?;
                updated += 1;
            }
        }

        Ok(updated)
    }
}
