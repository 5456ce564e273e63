//! Route definitions for the `/seances` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::seances;
use crate::state::AppState;

/// Routes mounted at `/seances`.
///
/// `/update-status` is registered before `/{id}` so the static segment is
/// never captured as an id.
///
/// ```text
/// GET    /update-status        -> update_statuses (public)
/// GET    /                     -> list_seances (public)
/// POST   /                     -> create_seance (admin)
/// GET    /{id}                 -> get_seance (public)
/// PUT    /{id}                 -> update_seance (admin)
/// DELETE /{id}                 -> delete_seance (admin)
/// GET    /{id}/disponibilite   -> get_disponibilite (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/update-status", get(seances::update_statuses))
        .route(
            "/",
            get(seances::list_seances).post(seances::create_seance),
        )
        .route(
            "/{id}",
            get(seances::get_seance)
                .put(seances::update_seance)
                .delete(seances::delete_seance),
        )
        .route("/{id}/disponibilite", get(seances::get_disponibilite))
}
