//! Comment thread under a post
//!
//! Comments are kept in memory for the lifetime of the thread only. There is
//! no storage and no moderation.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::content::PostId;

/// A submitted comment
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub author: String,
    pub content: String,
    pub datetime: DateTime<Local>,
}

/// Comments attached to one post, oldest first
#[derive(Debug, Clone)]
pub struct CommentThread {
    post: PostId,
    author: String,
    comments: Vec<Comment>,
}

impl CommentThread {
    /// Start an empty thread; new comments are signed with `author`
    pub fn new(post: PostId, author: impl Into<String>) -> Self {
        Self {
            post,
            author: author.into(),
            comments: Vec::new(),
        }
    }

    /// Append a comment. Blank content is ignored and yields `None`.
    pub fn submit(&mut self, content: &str) -> Option<&Comment> {
        if content.trim().is_empty() {
            return None;
        }

        self.comments.push(Comment {
            author: self.author.clone(),
            content: content.to_string(),
            datetime: Local::now(),
        });
        tracing::debug!("Comment added to post {}", self.post);
        self.comments.last()
    }

    pub fn post(&self) -> PostId {
        self.post
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}
