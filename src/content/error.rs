//! Errors raised while assembling the post collection

use std::path::PathBuf;

use thiserror::Error;

use super::PostId;

/// Failures detected when the post collection is built.
///
/// Queries over a built collection never fail; everything that could go
/// wrong is reported here, once, at load time.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid front-matter in {source_name}: {message}")]
    FrontMatter {
        source_name: String,
        message: String,
    },

    #[error("post {source_name} is missing required field `{field}`")]
    MissingField {
        source_name: String,
        field: &'static str,
    },

    #[error("post {source_name} has an unparseable date `{value}`")]
    InvalidDate { source_name: String, value: String },

    #[error("duplicate post id {id} ({first} and {second})")]
    DuplicateId {
        id: PostId,
        first: String,
        second: String,
    },

    #[error("invalid post id `{0}`")]
    InvalidId(String),
}

impl ContentError {
    pub fn front_matter(source_name: impl Into<String>, message: impl ToString) -> Self {
        Self::FrontMatter {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    pub fn missing_field(source_name: impl Into<String>, field: &'static str) -> Self {
        Self::MissingField {
            source_name: source_name.into(),
            field,
        }
    }
}
