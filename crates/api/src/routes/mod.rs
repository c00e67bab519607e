pub mod health;
pub mod movie;

use axum::Router;

use crate::state::AppState;

/// Mount point of the movie resource; also used to build `Location` headers.
pub const MOVIES_PATH: &str = "/Filme";

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /Filme                 list, create
/// /Filme/{id}            get, replace, patch, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest(MOVIES_PATH, movie::router())
}
