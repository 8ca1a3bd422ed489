//! HTTP server for the blog API.
//!
//! # Overview
//! Mounts the post and user routers under `/api/posts` and `/api/users`,
//! wraps them in request logging and a panic guard, and serves the result
//! with axum. Repositories are injected through `AppState`, so the same
//! router runs against the in-memory store in tests and SQLite in production.

use std::future::Future;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use blog_core::{MemoryStore, PostRepository, UserRepository};
use tokio::net::TcpListener;

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use config::Config;
pub use error::AppError;

/// Repositories shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    /// Back both resources with one store.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: PostRepository + UserRepository + 'static,
    {
        Self {
            posts: store.clone(),
            users: store,
        }
    }

    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(MemoryStore::new()))
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .merge(routes::posts::router())
        .merge(routes::users::router())
        .fallback(routes::fallback)
        .layer(axum::middleware::from_fn(middleware::catch_panic))
        .layer(axum::middleware::from_fn(middleware::log_request))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

/// Serve until `signal` resolves, then finish in-flight requests and return.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    state: AppState,
    signal: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(state))
        .with_graceful_shutdown(signal)
        .await
}
