//! Site configuration (_config.yml)

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::index::DEFAULT_RECENT_LIMIT;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub language: String,

    // Content
    /// Load posts from this directory instead of the bundled set
    pub content_dir: Option<PathBuf>,
    pub date_format: String,

    // Home page
    pub recent_limit: usize,

    // Search history
    pub history_limit: usize,
    pub history_file: PathBuf,

    // Comments
    pub guest_name: String,

    #[serde(default)]
    pub highlight: HighlightConfig,

    #[serde(default)]
    pub about: AboutConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            subtitle: String::new(),
            author: "戴振朋".to_string(),
            language: "zh-CN".to_string(),

            content_dir: None,
            date_format: "YYYY-MM-DD".to_string(),

            recent_limit: DEFAULT_RECENT_LIMIT,

            history_limit: DEFAULT_HISTORY_LIMIT,
            history_file: PathBuf::from(".folio/history.json"),

            guest_name: "访客".to_string(),

            highlight: HighlightConfig::default(),
            about: AboutConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded config from {:?}", path.as_ref());
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: true,
        }
    }
}

/// Profile shown on the about page and the home sidebar
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutConfig {
    pub name: String,
    pub role: String,
    pub bio: String,
    /// Contact channels (label -> value), in display order
    pub contacts: IndexMap<String, String>,
    /// Skill groups (group -> skills), in display order
    pub skills: IndexMap<String, Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Folio");
        assert_eq!(config.recent_limit, 5);
        assert_eq!(config.history_limit, 10);
        assert!(config.content_dir.is_none());
        assert!(config.highlight.line_number);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
author: Test User
recent_limit: 3
content_dir: posts
highlight:
  line_number: false
about:
  name: Test User
  skills:
    Frameworks: [Vue, React]
    Tools: [Git]
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.recent_limit, 3);
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.content_dir, Some(PathBuf::from("posts")));
        assert!(!config.highlight.line_number);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");

        let groups: Vec<_> = config.about.skills.keys().collect();
        assert_eq!(groups, vec!["Frameworks", "Tools"]);
    }

    #[test]
    fn test_shipped_config_parses() {
        let config: SiteConfig = serde_yaml::from_str(include_str!("../../_config.yml")).unwrap();
        assert_eq!(config.author, "戴振朋");
        assert_eq!(config.about.skills.len(), 5);
        assert_eq!(config.about.contacts.get("QQ").unwrap(), "123456789");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "title: From File\nhistory_limit: 4\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "From File");
        assert_eq!(config.history_limit, 4);
    }
}
