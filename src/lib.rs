//! folio-rs: content index for a personal blog/portfolio
//!
//! Posts are bundled into the binary (or read from a configured directory),
//! validated once, and then served through a read-only [`index::ContentIndex`]
//! that answers listing, tag, search and archive queries.

pub mod archive;
pub mod commands;
pub mod comments;
pub mod config;
pub mod content;
pub mod helpers;
pub mod history;
pub mod index;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::ContentLoader;
use history::{JsonFileStore, SearchHistory};
use index::ContentIndex;

/// The main application
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Queries over the loaded posts
    pub index: ContentIndex,
}

impl Folio {
    /// Create a new instance from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Self::with_config(base_dir, config)
    }

    /// Create an instance with an explicit configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Result<Self> {
        let posts = ContentLoader::new(&config).load(&base_dir)?;
        tracing::debug!("Content index holds {} posts", posts.len());

        Ok(Self {
            config,
            base_dir,
            index: ContentIndex::new(posts),
        })
    }

    /// Open the search history stored under the base directory
    pub fn search_history(&self) -> SearchHistory<JsonFileStore> {
        let store = JsonFileStore::new(self.base_dir.join(&self.config.history_file));
        SearchHistory::open(store, self.config.history_limit)
    }
}
