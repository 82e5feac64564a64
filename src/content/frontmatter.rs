//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use super::ContentError;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<Option<String>>()? {
                if let Some(item) = item {
                    vec.push(item);
                }
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter of a post file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub id: Option<u32>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    #[serde(alias = "readTime")]
    pub read_time: Option<String>,
    #[serde(alias = "coverImage")]
    pub cover_image: Option<String>,
    pub likes: u32,
    pub views: u32,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse<'c>(source_name: &str, content: &'c str) -> Result<(Self, &'c str), ContentError> {
        let content = content.trim_start();

        // YAML front-matter (---)
        if content.starts_with("---") {
            return Self::parse_yaml(source_name, content);
        }

        // JSON front-matter (;;; or {"key":)
        if content.starts_with(";;;") || content.starts_with('{') {
            return Self::parse_json(source_name, content);
        }

        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml<'c>(source_name: &str, content: &'c str) -> Result<(Self, &'c str), ContentError> {
        let rest = &content[3..];
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            // No closing ---, treat as no front-matter
            return Ok((FrontMatter::default(), content));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 4..];
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        // A leading `---` may just be a markdown rule; require at least one `key: value` line
        let has_yaml_structure = yaml_content.lines().any(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return false;
            }
            if let Some(colon_pos) = trimmed.find(':') {
                let before_colon = &trimmed[..colon_pos];
                let is_valid_key = !before_colon.is_empty()
                    && before_colon
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
                    && before_colon != "http"
                    && before_colon != "https"
                    && before_colon != "ftp";
                if is_valid_key {
                    let after_colon = &trimmed[colon_pos + 1..];
                    return after_colon.is_empty() || after_colon.starts_with(' ');
                }
            }
            false
        });

        if !has_yaml_structure {
            return Ok((FrontMatter::default(), content));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)
            .map_err(|e| ContentError::front_matter(source_name, e))?;
        Ok((fm, remaining))
    }

    fn parse_json<'c>(source_name: &str, content: &'c str) -> Result<(Self, &'c str), ContentError> {
        // JSON front-matter ends with ;;;
        if let Some(rest) = content.strip_prefix(";;;") {
            if let Some(end_pos) = rest.find(";;;") {
                let json_content = &rest[..end_pos];
                let remaining = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);

                let fm: FrontMatter = serde_json::from_str(json_content)
                    .map_err(|e| ContentError::front_matter(source_name, e))?;

                return Ok((fm, remaining));
            }
        }

        if content.starts_with('{') {
            let mut stream = serde_json::Deserializer::from_str(content).into_iter::<FrontMatter>();
            if let Some(fm) = stream.next() {
                let fm = fm.map_err(|e| ContentError::front_matter(source_name, e))?;
                let remaining = content[stream.byte_offset()..].trim_start_matches(['\n', '\r']);
                return Ok((fm, remaining));
            }
        }

        Err(ContentError::front_matter(
            source_name,
            "unterminated JSON front-matter",
        ))
    }

    /// Parse the date string
    pub fn parse_date(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// Parse a date string in various formats
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
        // Try parsing date only
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601 with offset, normalised to UTC
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
id: 7
title: Hello World
summary: A first post
date: 2024-01-15 10:30:00
tags:
  - rust
  - blog
read_time: 3 min
likes: 4
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse("hello.md", content).unwrap();
        assert_eq!(fm.id, Some(7));
        assert_eq!(fm.title, Some("Hello World".to_string()));
        assert_eq!(fm.summary, Some("A first post".to_string()));
        assert_eq!(fm.tags, vec!["rust", "blog"]);
        assert_eq!(fm.read_time, Some("3 min".to_string()));
        assert_eq!(fm.likes, 4);
        assert_eq!(fm.views, 0);
        assert!(remaining.contains("This is the content."));
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#"{"id": 2, "title": "Test Post", "tags": ["a", "b"], "coverImage": "cover.png"}

This is content.
"#;

        let (fm, remaining) = FrontMatter::parse("test.md", content).unwrap();
        assert_eq!(fm.id, Some(2));
        assert_eq!(fm.title, Some("Test Post".to_string()));
        assert_eq!(fm.tags, vec!["a", "b"]);
        assert_eq!(fm.cover_image, Some("cover.png".to_string()));
        assert!(remaining.contains("This is content."));
    }

    #[test]
    fn test_json_frontmatter_with_braces_in_strings() {
        let content = "{\"id\": 9, \"title\": \"Closures }\", \"summary\": \"{ nested }\", \"date\": \"2024-01-01\"}\n\nbody";

        let (fm, remaining) = FrontMatter::parse("brace.md", content).unwrap();
        assert_eq!(fm.id, Some(9));
        assert_eq!(fm.title.as_deref(), Some("Closures }"));
        assert_eq!(fm.summary.as_deref(), Some("{ nested }"));
        assert_eq!(remaining, "body");
    }

    #[test]
    fn test_unterminated_json_frontmatter_is_an_error() {
        assert!(FrontMatter::parse("open.md", "{\"id\": 1, \"title\": \"x\"\n\nbody").is_err());
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let content = "---\nid: [1, 2\ntitle: broken\n---\nbody\n";
        let err = FrontMatter::parse("broken.md", content).unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter { .. }));
    }

    #[test]
    fn test_parse_date() {
        let fm = FrontMatter {
            date: Some("2024-01-15 10:30:00".to_string()),
            ..Default::default()
        };

        let dt = fm.parse_date().unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 10:30");
    }

    #[test]
    fn test_parse_date_only() {
        let dt = parse_date_string("2024-11-12").unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-11-12");
        assert!(parse_date_string("not a date").is_none());
        assert!(parse_date_string("2024-13-40").is_none());
    }

    #[test]
    fn test_parse_single_string_tags() {
        let content = r#"---
id: 1
title: Single Tag Post
date: 2024-01-15
tags: Notes
---

Content here.
"#;

        let (fm, _) = FrontMatter::parse("single.md", content).unwrap();
        assert_eq!(fm.title, Some("Single Tag Post".to_string()));
        assert_eq!(fm.tags, vec!["Notes"]);
    }

    #[test]
    fn test_markdown_separator_not_yaml() {
        let content = r#"
---

Some random text with markdown lists:
- Item 1
- Item 2

---
More content here.
"#;

        let (fm, remaining) = FrontMatter::parse("notes.md", content).unwrap();
        assert_eq!(fm.title, None);
        assert!(remaining.contains("Some random text"));
    }

    #[test]
    fn test_content_with_url_not_yaml() {
        let content = r#"
---

Check out https://example.com/path and http://test.com

---
More content.
"#;

        let (fm, remaining) = FrontMatter::parse("links.md", content).unwrap();
        assert_eq!(fm.title, None);
        assert!(remaining.contains("https://example.com"));
    }
}
