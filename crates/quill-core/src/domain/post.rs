use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - a blog post owned by exactly one user.
///
/// `user_id` is a non-owning reference to the author and must resolve to an
/// existing user for the post's entire lifetime. `created_at` is set once at
/// creation and never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A post that has not been persisted yet; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    /// Create a post draft, stamping the creation time.
    pub fn new(user_id: i64, title: String, content: String) -> Self {
        Self {
            user_id,
            title,
            content,
            created_at: Utc::now(),
        }
    }
}

/// Partial update of a post. Absent fields keep their prior values.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostUpdate {
    /// True when the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// A post joined with its author's username, as read back from the store.
#[derive(Debug, Clone)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: Option<String>,
}
