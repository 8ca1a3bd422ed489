//! Domain and persistence core for the blog API.
//!
//! # Overview
//! Holds everything below the HTTP layer: the `Post` and `User` records,
//! inline validation of untyped JSON bodies, the repository traits, and two
//! store backends (in-memory and SQLite).
//!
//! # Design
//! - Not-found is a value (`Option` / `bool`), never an error.
//! - `StoreError` covers every other persistence failure and is meant to be
//!   translated into a generic server error at a single point upstream.
//! - Validated `*Fields` types are the only input a repository accepts.

pub mod error;
pub mod store;
pub mod types;
pub mod validate;

pub use error::{StoreError, StoreResult, ValidationError};
pub use store::{MemoryStore, PostRepository, SqliteStore, UserRepository};
pub use types::{Post, PostFields, User, UserFields};
