//! Content loader - builds the post collection from bundled or on-disk markdown

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{ContentError, FrontMatter, Post, PostCollection, PostId};
use crate::config::SiteConfig;

/// Posts compiled into the binary, as (file name, raw markdown)
const BUNDLED_POSTS: &[(&str, &str)] = &[
    (
        "react-tailwind-modern-website.md",
        include_str!("../../content/posts/react-tailwind-modern-website.md"),
    ),
    (
        "typescript-advanced-features.md",
        include_str!("../../content/posts/typescript-advanced-features.md"),
    ),
    (
        "frontend-screen-adaptation.md",
        include_str!("../../content/posts/frontend-screen-adaptation.md"),
    ),
    (
        "react-toast-ui-calendar-guide.md",
        include_str!("../../content/posts/react-toast-ui-calendar-guide.md"),
    ),
];

/// Loads posts and validates them into a [`PostCollection`]
pub struct ContentLoader<'a> {
    config: &'a SiteConfig,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Load the configured content: `content_dir` when set, the bundled posts otherwise
    pub fn load(&self, base_dir: &Path) -> Result<PostCollection, ContentError> {
        match &self.config.content_dir {
            Some(dir) => self.load_dir(&base_dir.join(dir)),
            None => self.load_bundled(),
        }
    }

    /// Load the posts compiled into the binary
    pub fn load_bundled(&self) -> Result<PostCollection, ContentError> {
        let posts = BUNDLED_POSTS
            .iter()
            .map(|(name, raw)| self.parse_post(name, raw))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Loaded {} bundled posts", posts.len());
        PostCollection::new(posts)
    }

    /// Load every markdown file under `dir`
    pub fn load_dir(&self, dir: &Path) -> Result<PostCollection, ContentError> {
        if !dir.exists() {
            tracing::warn!("Content directory {:?} does not exist", dir);
            return Ok(PostCollection::empty());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !(path.is_file() && is_markdown_file(path)) {
                continue;
            }

            let raw = fs::read_to_string(path).map_err(|source| ContentError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let name = path
                .strip_prefix(dir)
                .unwrap_or(path)
                .to_string_lossy()
                .to_string();

            posts.push(self.parse_post(&name, &raw)?);
        }

        tracing::info!("Loaded {} posts from {:?}", posts.len(), dir);
        PostCollection::new(posts)
    }

    /// Parse one post file
    pub fn parse_post(&self, name: &str, raw: &str) -> Result<Post, ContentError> {
        let (fm, body) = FrontMatter::parse(name, raw)?;

        let id = fm
            .id
            .map(PostId)
            .ok_or_else(|| ContentError::missing_field(name, "id"))?;

        let date_str = fm
            .date
            .as_deref()
            .ok_or_else(|| ContentError::missing_field(name, "date"))?;
        let date = fm.parse_date().ok_or_else(|| ContentError::InvalidDate {
            source_name: name.to_string(),
            value: date_str.to_string(),
        })?;

        let title = fm.title.unwrap_or_else(|| {
            Path::new(name)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string()
        });

        let mut post = Post::new(id, title, date, name.to_string());
        post.summary = fm.summary.unwrap_or_default();
        post.content = body.to_string();
        post.author = fm.author.unwrap_or_else(|| self.config.author.clone());
        post.tags = fm.tags;
        post.read_time = fm.read_time.unwrap_or_default();
        post.cover_image = fm.cover_image;
        post.likes = fm.likes;
        post.views = fm.views;

        Ok(post)
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
