//! Periodic refresh of the advisory seance status column.
//!
//! Spawns a background task that recomputes every seance's status and
//! rewrites only the stale rows, on a fixed interval using
//! `tokio::time::interval`. The same pass is exposed on demand via
//! `GET /seances/update-status`.

use std::time::Duration;

use chrono::Utc;
use cinebook_db::repositories::SeanceRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Run the status refresh loop.
///
/// Rewrites seances whose stored `statut` no longer matches the computed
/// value. Runs until `cancel` is triggered.
pub async fn run(pool: PgPool, interval_secs: u64, cancel: CancellationToken) {
    tracing::info!(interval_secs, "Status refresh job started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Status refresh job stopping");
                break;
            }
            _ = interval.tick() => {
                match SeanceRepo::refresh_statuses(&pool, Utc::now()).await {
                    Ok(updated) => {
                        if updated > 0 {
                            tracing::info!(updated, "Status refresh: rewrote stale rows");
                        } else {
                            tracing::debug!("Status refresh: nothing stale");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Status refresh failed");
                    }
                }
            }
        }
    }
}
