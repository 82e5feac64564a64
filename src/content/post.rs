//! Post model and the validated post collection

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::ContentError;

/// Stable numeric identifier of a post, used in `/post/{id}` routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub u32);

impl PostId {
    /// Parse the id out of a `/post/{id}` style route.
    ///
    /// A bare id (`"3"`) is accepted as well.
    pub fn from_route(route: &str) -> Result<Self, ContentError> {
        let trimmed = route.trim().trim_end_matches('/');
        let raw = trimmed
            .strip_prefix("/post/")
            .or_else(|| trimmed.strip_prefix("post/"))
            .unwrap_or(trimmed);
        raw.parse()
    }
}

impl FromStr for PostId {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(PostId)
            .map_err(|_| ContentError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PostId {
    fn from(id: u32) -> Self {
        PostId(id)
    }
}

/// A blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier
    pub id: PostId,

    /// Post title
    pub title: String,

    /// Short teaser shown in listings
    pub summary: String,

    /// Raw markdown content
    pub content: String,

    /// Author display name
    pub author: String,

    /// Publication date
    pub date: NaiveDateTime,

    /// Post tags, in authored order
    pub tags: Vec<String>,

    /// Estimated reading time, free-form ("5分钟", "8 min")
    pub read_time: String,

    /// Cover image URL
    pub cover_image: Option<String>,

    pub likes: u32,
    pub views: u32,

    /// Where the post was loaded from (file name or path)
    pub source: String,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(id: PostId, title: String, date: NaiveDateTime, source: String) -> Self {
        Self {
            id,
            title,
            summary: String::new(),
            content: String::new(),
            author: String::new(),
            date,
            tags: Vec::new(),
            read_time: String::new(),
            cover_image: None,
            likes: 0,
            views: 0,
            source,
        }
    }

    /// Calendar year of the publication date
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// `YYYY-MM` key used by the archive
    pub fn year_month(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    /// Route under which the post is addressed
    pub fn route(&self) -> String {
        format!("/post/{}", self.id)
    }

    /// Get the previous post in a list
    pub fn prev<'a>(&self, posts: &[&'a Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.id == self.id)?;
        if pos > 0 {
            Some(posts[pos - 1])
        } else {
            None
        }
    }

    /// Get the next post in a list
    pub fn next<'a>(&self, posts: &[&'a Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.id == self.id)?;
        posts.get(pos + 1).copied()
    }
}

/// A tag together with the number of posts carrying it
#[derive(Debug, Clone, Serialize)]
pub struct Tag {
    pub name: String,
    pub slug: String,
    pub count: usize,
}

impl Tag {
    pub fn new(name: &str, count: usize) -> Self {
        Self {
            name: name.to_string(),
            slug: slug::slugify(name),
            count,
        }
    }
}

/// The fixed, validated set of posts.
///
/// Construction is the only place where the collection is checked; once a
/// `PostCollection` exists every id is unique and every tag is non-empty.
#[derive(Debug, Clone, Default)]
pub struct PostCollection {
    posts: Vec<Post>,
}

impl PostCollection {
    /// Validate and take ownership of `posts`
    pub fn new(mut posts: Vec<Post>) -> Result<Self, ContentError> {
        let mut seen: HashMap<PostId, String> = HashMap::new();

        for post in &mut posts {
            if let Some(first) = seen.get(&post.id) {
                return Err(ContentError::DuplicateId {
                    id: post.id,
                    first: first.clone(),
                    second: post.source.clone(),
                });
            }
            seen.insert(post.id, post.source.clone());

            post.tags.retain(|t| !t.trim().is_empty());
        }

        tracing::debug!("Validated {} posts", posts.len());
        Ok(Self { posts })
    }

    /// An empty collection
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Post> {
        self.posts.iter()
    }
}

impl<'a> IntoIterator for &'a PostCollection {
    type Item = &'a Post;
    type IntoIter = std::slice::Iter<'a, Post>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.iter()
    }
}

#[cfg(test)]
pub(crate) fn test_post(id: u32, date: &str, tags: &[&str]) -> Post {
    let date = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let mut post = Post::new(
        PostId(id),
        format!("Post {}", id),
        date,
        format!("post-{}.md", id),
    );
    post.tags = tags.iter().map(|t| t.to_string()).collect();
    post
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_id_from_route() {
        assert_eq!(PostId::from_route("/post/3").unwrap(), PostId(3));
        assert_eq!(PostId::from_route("/post/12/").unwrap(), PostId(12));
        assert_eq!(PostId::from_route("7").unwrap(), PostId(7));
        assert!(matches!(
            PostId::from_route("/post/abc"),
            Err(ContentError::InvalidId(_))
        ));
        assert!("-1".parse::<PostId>().is_err());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let posts = vec![
            test_post(1, "2024-03-19", &[]),
            test_post(1, "2024-03-20", &[]),
        ];
        let err = PostCollection::new(posts).unwrap_err();
        assert!(matches!(err, ContentError::DuplicateId { id: PostId(1), .. }));
    }

    #[test]
    fn test_blank_tags_dropped() {
        let posts = vec![test_post(1, "2024-03-19", &["rust", "", "  "])];
        let collection = PostCollection::new(posts).unwrap();
        let post = collection.iter().next().unwrap();
        assert_eq!(post.tags, vec!["rust"]);
    }

    #[test]
    fn test_prev_next() {
        let a = test_post(1, "2024-03-21", &[]);
        let b = test_post(2, "2024-03-20", &[]);
        let c = test_post(3, "2024-03-19", &[]);
        let list = vec![&a, &b, &c];

        assert!(a.prev(&list).is_none());
        assert_eq!(b.prev(&list).unwrap().id, PostId(1));
        assert_eq!(b.next(&list).unwrap().id, PostId(3));
        assert!(c.next(&list).is_none());
    }

    #[test]
    fn test_year_month_key() {
        let post = test_post(1, "2024-03-09", &[]);
        assert_eq!(post.year(), 2024);
        assert_eq!(post.year_month(), "2024-03");
        assert_eq!(post.route(), "/post/1");
    }
}
