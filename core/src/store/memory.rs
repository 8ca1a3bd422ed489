//! In-memory store, used when no database is configured and in tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{PostRepository, UserRepository};
use crate::error::StoreResult;
use crate::types::{Post, PostFields, User, UserFields};

/// One resource's rows plus its id sequence. Ids start at 1 and are never
/// reused, even after a delete.
#[derive(Debug)]
struct Table<T> {
    last_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            last_id: 0,
            rows: BTreeMap::new(),
        }
    }

    fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> T {
        self.last_id += 1;
        let row = build(self.last_id);
        self.rows.insert(self.last_id, row.clone());
        row
    }

    fn replace_with(&mut self, id: i64, build: impl FnOnce(i64) -> T) -> Option<T> {
        let slot = self.rows.get_mut(&id)?;
        *slot = build(id);
        Some(slot.clone())
    }
}

/// Process-local store backing both repositories.
#[derive(Debug)]
pub struct MemoryStore {
    posts: RwLock<Table<Post>>,
    users: RwLock<Table<User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Table::new()),
            users: RwLock::new(Table::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<Post>> {
        Ok(self.posts.read().await.rows.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> StoreResult<Option<Post>> {
        Ok(self.posts.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, fields: PostFields) -> StoreResult<Post> {
        let mut posts = self.posts.write().await;
        Ok(posts.insert_with(|id| Post::from_fields(id, fields)))
    }

    async fn update(&self, id: i64, fields: PostFields) -> StoreResult<Option<Post>> {
        let mut posts = self.posts.write().await;
        Ok(posts.replace_with(id, |id| Post::from_fields(id, fields)))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.posts.write().await.rows.remove(&id).is_some())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<User>> {
        Ok(self.users.read().await.rows.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, fields: UserFields) -> StoreResult<User> {
        let mut users = self.users.write().await;
        Ok(users.insert_with(|id| User::from_fields(id, fields)))
    }

    async fn update(&self, id: i64, fields: UserFields) -> StoreResult<Option<User>> {
        let mut users = self.users.write().await;
        Ok(users.replace_with(id, |id| User::from_fields(id, fields)))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.users.write().await.rows.remove(&id).is_some())
    }
}
