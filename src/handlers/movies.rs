//! # Movie Handlers
//!
//! JSON endpoints over the `movie` table. Missing records answer with a `null`
//! body and 404; persistence failures go through `AppError`.

use crate::db::models::{DeleteOutcome, DeletedMovies, Movie, NewMovie};
use crate::db::movies;
use crate::error::AppResult;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

/// GET /api/movies
pub async fn list_movies(State(state): State<AppState>) -> AppResult<Json<Vec<Movie>>> {
    let movies = movies::list(&state.db).await?;

    Ok(Json(movies))
}

/// POST /api/movies
///
/// ## Request
/// ```json
/// { "name": "Inception" }
/// ```
///
/// ## Response (201)
/// ```json
/// { "id": 1, "name": "Inception" }
/// ```
pub async fn create_movie(
    State(state): State<AppState>,
    Json(req): Json<NewMovie>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    let movie = movies::create(&state.db, req.name.as_deref()).await?;
    tracing::debug!(id = movie.id, "Movie created");

    Ok((StatusCode::CREATED, Json(movie)))
}

/// DELETE /api/movies
pub async fn delete_all_movies(State(state): State<AppState>) -> AppResult<Json<DeletedMovies>> {
    let num_rows_del = movies::delete_all(&state.db).await?;
    tracing::info!(num_rows_del, "All movies deleted");

    Ok(Json(DeletedMovies { num_rows_del }))
}

/// GET /api/movies/{id}
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<Option<Movie>>)> {
    let movie = movies::get_by_id(&state.db, id).await?;
    let status = if movie.is_some() { StatusCode::OK } else { StatusCode::NOT_FOUND };

    Ok((status, Json(movie)))
}

/// DELETE /api/movies/{id}
///
/// Always answers `null`; the status tells whether a row was removed.
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<Option<Movie>>)> {
    let status = match movies::delete_by_id(&state.db, id).await? {
        DeleteOutcome::Deleted => StatusCode::OK,
        DeleteOutcome::NotFound => StatusCode::NOT_FOUND,
    };

    Ok((status, Json(None)))
}
