//! Movie API handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use marquee_core::{Movie, MoviePage, MovieUpdate, NewMovie, RawMovieQuery};

use super::error::ApiError;
use super::middleware::AuthUser;
use crate::state::AppState;

/// Response for delete operations. The removed record rides along so
/// clients can show what disappeared.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub movie: Movie,
}

/// List movies with optional filters, sorting and pagination.
///
/// Parameters arrive as raw strings; the catalog decides what is a
/// validation error (paging) and what silently falls back (sorting).
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RawMovieQuery>,
) -> Result<Json<MoviePage>, ApiError> {
    let page = state.service().list(&params)?;
    Ok(Json(page))
}

/// Create a movie. The slug is derived from the title server-side and is
/// not part of the payload.
pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(body): Json<NewMovie>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let movie = state.service().create(body)?;
    info!("Movie '{}' created by {}", movie.slug, user);
    Ok((StatusCode::CREATED, Json(movie)))
}

/// Get a movie by numeric id or slug.
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    let movie = state.service().get(&token)?;
    Ok(Json(movie))
}

/// Partially update a movie. Absent fields keep their current values; the
/// slug never changes.
pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    Json(body): Json<MovieUpdate>,
) -> Result<Json<Movie>, ApiError> {
    let movie = state.service().update(&token, &body)?;
    Ok(Json(movie))
}

/// Delete a movie and return the removed record.
pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(token): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let movie = state.service().delete(&token)?;
    info!("Movie '{}' deleted by {}", movie.slug, user);
    Ok(Json(DeleteResponse {
        message: format!("Movie '{}' deleted", movie.slug),
        movie,
    }))
}
