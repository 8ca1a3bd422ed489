//! `/api/users` routes and handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use blog_core::UserFields;

use super::{bad_request, not_found, parse_id};
use crate::error::AppError;
use crate::middleware::JsonBody;
use crate::AppState;

const NOT_FOUND: &str = "User not found";

pub const PREFIX: &str = "/api/users";

/// Routes under [`PREFIX`]. The collection also answers with a trailing
/// slash (`/api/users/`).
pub fn router() -> Router<AppState> {
    let collection = || get(list_users).post(create_user);
    Router::new()
        .route(PREFIX, collection())
        .route(&format!("{PREFIX}/"), collection())
        .route(
            &format!("{PREFIX}/{{id}}"),
            get(get_user).put(update_user).delete(delete_user),
        )
}

async fn list_users(State(state): State<AppState>) -> Result<Response, AppError> {
    let users = state.users.list().await?;
    Ok(Json(users).into_response())
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let Some(id) = parse_id(&id) else {
        return Ok(not_found(NOT_FOUND));
    };
    Ok(match state.users.get(id).await? {
        Some(user) => Json(user).into_response(),
        None => not_found(NOT_FOUND),
    })
}

async fn create_user(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Response, AppError> {
    let fields = match UserFields::from_json(&body) {
        Ok(fields) => fields,
        Err(err) => return Ok(bad_request(err)),
    };
    let user = state.users.create(fields).await?;
    Ok((StatusCode::CREATED, Json(user)).into_response())
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Response, AppError> {
    let fields = match UserFields::from_json(&body) {
        Ok(fields) => fields,
        Err(err) => return Ok(bad_request(err)),
    };
    let Some(id) = parse_id(&id) else {
        return Ok(not_found(NOT_FOUND));
    };
    Ok(match state.users.update(id, fields).await? {
        Some(user) => Json(user).into_response(),
        None => not_found(NOT_FOUND),
    })
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let Some(id) = parse_id(&id) else {
        return Ok(not_found(NOT_FOUND));
    };
    if state.users.delete(id).await? {
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Ok(not_found(NOT_FOUND))
    }
}
