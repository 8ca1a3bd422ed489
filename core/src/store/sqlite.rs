//! SQLite-backed store over a `sqlx` connection pool.
//!
//! ## Schema
//!
//! `connect` creates the `posts` and `users` tables when they are missing.
//! Ids come from `INTEGER PRIMARY KEY AUTOINCREMENT`, so they are assigned by
//! the database and never reused.
//!
//! ## Error mapping
//!
//! | sqlx error | `StoreError` |
//! |---|---|
//! | `Database` with a constraint kind | `Constraint` |
//! | `PoolClosed`, `PoolTimedOut`, `Io` | `Unavailable` |
//! | anything else | `Query` |
//!
//! "No matching row" is never an error here: `get`/`update` use
//! `fetch_optional` and `delete` inspects `rows_affected`.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::error::ErrorKind;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{FromRow, Row};
use tracing::debug;

use super::{PostRepository, UserRepository};
use crate::error::{StoreError, StoreResult};
use crate::types::{Post, PostFields, User, UserFields};

const CREATE_POSTS: &str = r#"
    CREATE TABLE IF NOT EXISTS posts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        content TEXT NOT NULL
    )
"#;

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        age INTEGER NOT NULL
    )
"#;

/// Relational store backing both repositories.
///
/// Cloning is cheap; clones share the pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open a pool for `url` and make sure both tables exist.
    ///
    /// In-memory URLs get a single long-lived connection, otherwise every
    /// pooled connection would see its own empty database.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| map_sqlx_error("connect", e))?
            .create_if_missing(true);

        let pool_options = if is_memory_url(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;

        let store = Self { pool };
        store.ensure_schema().await?;
        debug!(url, "sqlite store ready");
        Ok(store)
    }

    pub async fn ensure_schema(&self) -> StoreResult<()> {
        for ddl in [CREATE_POSTS, CREATE_USERS] {
            sqlx::query(ddl)
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        }
        Ok(())
    }

    /// Close the pool; later calls fail with `StoreError::Unavailable`.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[async_trait]
impl PostRepository for SqliteStore {
    async fn list(&self) -> StoreResult<Vec<Post>> {
        sqlx::query_as::<_, Post>("SELECT id, title, content FROM posts ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_posts", e))
    }

    async fn get(&self, id: i64) -> StoreResult<Option<Post>> {
        sqlx::query_as::<_, Post>("SELECT id, title, content FROM posts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_post", e))
    }

    async fn create(&self, fields: PostFields) -> StoreResult<Post> {
        sqlx::query_as::<_, Post>(
            "INSERT INTO posts (title, content) VALUES (?, ?) RETURNING id, title, content",
        )
        .bind(fields.title)
        .bind(fields.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_post", e))
    }

    async fn update(&self, id: i64, fields: PostFields) -> StoreResult<Option<Post>> {
        sqlx::query_as::<_, Post>(
            "UPDATE posts SET title = ?, content = ? WHERE id = ? RETURNING id, title, content",
        )
        .bind(fields.title)
        .bind(fields.content)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_post", e))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_post", e))?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserRepository for SqliteStore {
    async fn list(&self) -> StoreResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT id, name, last_name, age FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_users", e))
    }

    async fn get(&self, id: i64) -> StoreResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT id, name, last_name, age FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_user", e))
    }

    async fn create(&self, fields: UserFields) -> StoreResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, last_name, age) VALUES (?, ?, ?) \
             RETURNING id, name, last_name, age",
        )
        .bind(fields.name)
        .bind(fields.last_name)
        .bind(fields.age)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_user", e))
    }

    async fn update(&self, id: i64, fields: UserFields) -> StoreResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET name = ?, last_name = ?, age = ? WHERE id = ? \
             RETURNING id, name, last_name, age",
        )
        .bind(fields.name)
        .bind(fields.last_name)
        .bind(fields.age)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_user", e))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_user", e))?;
        Ok(result.rows_affected() > 0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Post {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Post {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            content: row.try_get("content")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for User {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(User {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            last_name: row.try_get("last_name")?,
            age: row.try_get("age")?,
        })
    }
}

/// Map SQLx errors to `StoreError`, tagging the failed operation.
pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {operation}: {}", db_err.message());
            match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => StoreError::Constraint(msg),
                _ => StoreError::Query(msg),
            }
        }
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("connection pool unavailable in {operation}"))
        }
        sqlx::Error::Io(e) => StoreError::Unavailable(format!("i/o error in {operation}: {e}")),
        other => StoreError::Query(format!("sqlx error in {operation}: {other}")),
    }
}
