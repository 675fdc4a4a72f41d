//! Board data types
//!
//! - `Post`: a board entry with its comment thread
//! - `Comment`: an anonymous reply, append-only
//! - `PostDraft`: the write form's contents
//! - `PostEdit`: replacement fields for an existing post

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post identifier, unique within a board
pub type PostId = u64;

/// Comment identifier, unique within a board
pub type CommentId = u64;

/// Author shown on every comment
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// A board post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// How many times the post has been opened
    #[serde(default)]
    pub views: u32,
    /// Oldest first
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Needed to edit or delete; never sent back by the board service
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
}

impl Post {
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    /// Case-insensitive substring match on title, author or content
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.author.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
    }
}

/// A reply to a post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Contents of the write form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub author: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
}

impl PostDraft {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            content: content.into(),
            password: String::new(),
        }
    }

    /// Builder method: set the edit/delete password
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Names of the required fields left empty, in form order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("author", &self.author),
            ("content", &self.content),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Reset every field, as after a successful submit
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Replacement fields for an existing post; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostEdit {
    pub title: Option<String>,
    pub content: Option<String>,
}
