//! Handlers for the `/Filme` resource.
//!
//! Every write path builds a candidate [`Movie`] and validates it against the
//! entity constraints before touching the store. Partial updates apply the
//! JSON Patch to the [`UpdateMovie`] projection and validate the patched
//! result, never the stored original.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use filmes_core::error::CoreError;
use filmes_core::pagination::Page;
use filmes_core::patch::{apply_patch, PatchDocument};
use filmes_core::types::DbId;
use filmes_db::models::movie::{CreateMovie, Movie, ReadMovie, UpdateMovie};

use crate::error::{AppError, AppResult};
use crate::middleware::extract::{ApiJson, ApiPath, ApiQuery};
use crate::query::PaginationParams;
use crate::routes::MOVIES_PATH;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Movie", id })
}

/// Load the movie or fail with 404.
async fn find_movie(state: &AppState, id: DbId) -> AppResult<Movie> {
    state.store.find_by_id(id).await?.ok_or_else(|| not_found(id))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /Filme
///
/// Responds 201 with the stored movie and a `Location` header.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateMovie>,
) -> AppResult<impl IntoResponse> {
    let movie = Movie::from(input);
    movie.validate_fields()?;

    let created = state.store.insert(&movie).await?;
    tracing::info!(id = created.id, title = %created.title, "Movie created");

    let location = format!("{MOVIES_PATH}/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// GET /Filme?skip=0&take=50
///
/// Out-of-range windows yield an empty list rather than an error.
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> AppResult<Json<Vec<ReadMovie>>> {
    let page = Page::from(params);
    let movies = state.store.list(page).await?;

    let queried_at = Utc::now();
    let body = movies
        .into_iter()
        .map(|m| ReadMovie::captured_at(m, queried_at))
        .collect();
    Ok(Json(body))
}

/// GET /Filme/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<ReadMovie>> {
    let movie = find_movie(&state, id).await?;
    Ok(Json(ReadMovie::from(movie)))
}

/// PUT /Filme/{id}
///
/// Replaces every mutable field. The stored row is untouched if the
/// replacement fails validation.
pub async fn replace(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdateMovie>,
) -> AppResult<StatusCode> {

    let candidate = find_movie(&state, id).await?.with_update(input);
    candidate.validate_fields()?;

    if !state.store.update(&candidate).await? {
        return Err(not_found(id));
    }
    tracing::info!(id, "Movie replaced");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /Filme/{id}
///
/// Body is a JSON Patch array targeting `title`, `genre` and `duration`.
pub async fn patch(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(operations): ApiJson<PatchDocument>,
) -> AppResult<StatusCode> {

    let movie = find_movie(&state, id).await?;
    let draft = UpdateMovie::from(&movie);
    let patched = apply_patch(&draft, &operations).map_err(CoreError::from)?;

    let candidate = movie.with_update(patched);
    candidate.validate_fields()?;

    if !state.store.update(&candidate).await? {
        return Err(not_found(id));
    }
    tracing::info!(id, operations = operations.len(), "Movie patched");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /Filme/{id}
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    if !state.store.delete(id).await? {
        return Err(not_found(id));
    }
    tracing::info!(id, "Movie deleted");
    Ok(StatusCode::NO_CONTENT)
}
