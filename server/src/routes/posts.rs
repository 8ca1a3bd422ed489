//! `/api/posts` routes and handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use blog_core::PostFields;

use super::{bad_request, not_found, parse_id};
use crate::error::AppError;
use crate::middleware::JsonBody;
use crate::AppState;

const NOT_FOUND: &str = "Post not found";

pub const PREFIX: &str = "/api/posts";

/// Routes under [`PREFIX`]. The collection also answers with a trailing
/// slash (`/api/posts/`).
pub fn router() -> Router<AppState> {
    let collection = || get(list_posts).post(create_post);
    Router::new()
        .route(PREFIX, collection())
        .route(&format!("{PREFIX}/"), collection())
        .route(
            &format!("{PREFIX}/{{id}}"),
            get(get_post).put(update_post).delete(delete_post),
        )
}

async fn list_posts(State(state): State<AppState>) -> Result<Response, AppError> {
    let posts = state.posts.list().await?;
    Ok(Json(posts).into_response())
}

async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let Some(id) = parse_id(&id) else {
        return Ok(not_found(NOT_FOUND));
    };
    Ok(match state.posts.get(id).await? {
        Some(post) => Json(post).into_response(),
        None => not_found(NOT_FOUND),
    })
}

async fn create_post(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Response, AppError> {
    let fields = match PostFields::from_json(&body) {
        Ok(fields) => fields,
        Err(err) => return Ok(bad_request(err)),
    };
    let post = state.posts.create(fields).await?;
    Ok((StatusCode::CREATED, Json(post)).into_response())
}

async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Response, AppError> {
    // Body first: an invalid body is a 400 even when the id is unknown.
    let fields = match PostFields::from_json(&body) {
        Ok(fields) => fields,
        Err(err) => return Ok(bad_request(err)),
    };
    let Some(id) = parse_id(&id) else {
        return Ok(not_found(NOT_FOUND));
    };
    Ok(match state.posts.update(id, fields).await? {
        Some(post) => Json(post).into_response(),
        None => not_found(NOT_FOUND),
    })
}

async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let Some(id) = parse_id(&id) else {
        return Ok(not_found(NOT_FOUND));
    };
    if state.posts.delete(id).await? {
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Ok(not_found(NOT_FOUND))
    }
}
