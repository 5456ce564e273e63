//! Route definitions for the `/films` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::films;
use crate::state::AppState;

/// Routes mounted at `/films`.
///
/// ```text
/// GET    /       -> list_films (public)
/// POST   /       -> create_film (admin)
/// GET    /{id}   -> get_film (public)
/// PUT    /{id}   -> update_film (admin)
/// DELETE /{id}   -> delete_film (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(films::list_films).post(films::create_film))
        .route(
            "/{id}",
            get(films::get_film)
                .put(films::update_film)
                .delete(films::delete_film),
        )
}
