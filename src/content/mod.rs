//! Content module - posts, front-matter and markdown rendering

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use error::ContentError;
pub use frontmatter::{parse_date_string, FrontMatter};
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostCollection, PostId, Tag};

#[cfg(test)]
pub(crate) use post::test_post;
