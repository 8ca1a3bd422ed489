//! Domain types for the blog API.
//!
//! # Design
//! Stored records (`Post`, `User`) always carry a store-assigned `id`. The
//! `*Fields` types are the id-less payloads accepted by `create` and `update`;
//! they only exist after validation (see `validate`), so a repository never
//! sees unchecked input. The JSON shape uses camelCase keys to match the
//! HTTP contract (`lastName`).

use serde::{Deserialize, Serialize};

/// A stored blog post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// A stored user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub last_name: String,
    pub age: i64,
}

/// Validated fields for creating or replacing a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostFields {
    pub title: String,
    pub content: String,
}

/// Validated fields for creating or replacing a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserFields {
    pub name: String,
    pub last_name: String,
    pub age: i64,
}

impl Post {
    pub fn from_fields(id: i64, fields: PostFields) -> Self {
        Self {
            id,
            title: fields.title,
            content: fields.content,
        }
    }
}

impl User {
    pub fn from_fields(id: i64, fields: UserFields) -> Self {
        Self {
            id,
            name: fields.name,
            last_name: fields.last_name,
            age: fields.age,
        }
    }
}
