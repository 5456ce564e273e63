//! Route tree definitions, one module per resource.

pub mod auth;
pub mod films;
pub mod health;
pub mod seances;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                     login (public)
///
/// /films                          list (public), create (admin)
/// /films/{id}                     get (public), update, delete (admin)
///
/// /seances/update-status          batch status refresh (public)
/// /seances                        list (public), create (admin)
/// /seances/{id}                   get (public), update, delete (admin)
/// /seances/{id}/disponibilite     remaining seats (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/films", films::router())
        .nest("/seances", seances::router())
}
