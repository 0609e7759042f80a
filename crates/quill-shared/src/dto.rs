//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quill_core::domain::{Post, PostWithAuthor};

/// Wire format for post timestamps.
const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Request to register a new user.
///
/// Fields default to empty so an absent field and an empty one are rejected
/// the same way at validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Request to log in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login: a bearer token plus the username it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub username: String,
}

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Partial update of a post; only present fields are changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// A post as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub created_at: String,
}

impl PostResponse {
    pub fn new(post: Post, author: Option<String>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author,
            created_at: format_created_at(post.created_at),
        }
    }
}

impl From<PostWithAuthor> for PostResponse {
    fn from(joined: PostWithAuthor) -> Self {
        Self::new(joined.post, joined.author)
    }
}

/// A mutation confirmation carrying the affected post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostEnvelope {
    pub message: String,
    pub post: PostResponse,
}

impl PostEnvelope {
    pub fn new(message: impl Into<String>, post: PostResponse) -> Self {
        Self {
            message: message.into(),
            post,
        }
    }
}

fn format_created_at(ts: DateTime<Utc>) -> String {
    ts.format(CREATED_AT_FORMAT).to_string()
}
