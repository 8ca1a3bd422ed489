//! Repository abstraction over the persistence layer.
//!
//! Each resource gets its own trait with the same five operations. A missing
//! record is a normal outcome (`None` or `false`), never a `StoreError`.
//! Handlers hold these as `Arc<dyn ...>`, so the backing store is chosen once
//! at startup and swapped without touching the HTTP layer.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::{Post, PostFields, User, UserFields};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Data access for posts.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts in ascending id order.
    async fn list(&self) -> StoreResult<Vec<Post>>;

    async fn get(&self, id: i64) -> StoreResult<Option<Post>>;

    /// Persists a new post under a store-assigned id.
    async fn create(&self, fields: PostFields) -> StoreResult<Post>;

    /// Replaces every field of an existing post. `None` if `id` is unknown.
    async fn update(&self, id: i64, fields: PostFields) -> StoreResult<Option<Post>>;

    /// `true` if a post was removed, `false` if none existed.
    async fn delete(&self, id: i64) -> StoreResult<bool>;
}

/// Data access for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users in ascending id order.
    async fn list(&self) -> StoreResult<Vec<User>>;

    async fn get(&self, id: i64) -> StoreResult<Option<User>>;

    /// Persists a new user under a store-assigned id.
    async fn create(&self, fields: UserFields) -> StoreResult<User>;

    /// Replaces every field of an existing user. `None` if `id` is unknown.
    async fn update(&self, id: i64, fields: UserFields) -> StoreResult<Option<User>>;

    /// `true` if a user was removed, `false` if none existed.
    async fn delete(&self, id: i64) -> StoreResult<bool>;
}
