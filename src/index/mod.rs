//! Content index - read-only queries over the post collection
//!
//! Every view is derived on demand from the validated [`PostCollection`];
//! nothing here mutates or caches state, so all operations are total.

use indexmap::{IndexMap, IndexSet};
use std::str::FromStr;

use crate::content::{Post, PostCollection, PostId, Tag};

/// Number of posts in the "recent posts" sidebar
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Feed ordering by publication date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            other => Err(format!("unknown sort order `{}`", other)),
        }
    }
}

/// Stable re-sort of a result set
pub fn sort_posts(posts: &mut [&Post], order: SortOrder) {
    match order {
        SortOrder::Newest => posts.sort_by(|a, b| b.date.cmp(&a.date)),
        SortOrder::Oldest => posts.sort_by(|a, b| a.date.cmp(&b.date)),
    }
}

/// Post and tag totals shown in the home sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteStats {
    pub posts: usize,
    pub tags: usize,
}

/// Read-only query layer over the post collection
#[derive(Debug, Clone, Default)]
pub struct ContentIndex {
    posts: PostCollection,
}

impl ContentIndex {
    pub fn new(posts: PostCollection) -> Self {
        Self { posts }
    }

    /// All posts, most recent first; equal dates keep collection order
    pub fn list_all(&self) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.posts.iter().collect();
        sort_posts(&mut posts, SortOrder::Newest);
        posts
    }

    /// Look up a post by id
    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Posts carrying exactly `tag` (case-sensitive), most recent first
    pub fn find_by_tag(&self, tag: &str) -> Vec<&Post> {
        self.list_all()
            .into_iter()
            .filter(|p| p.tags.iter().any(|t| t == tag))
            .collect()
    }

    /// The `limit` most recent posts
    pub fn recent(&self, limit: usize) -> Vec<&Post> {
        let mut posts = self.list_all();
        posts.truncate(limit);
        posts
    }

    /// Distinct tags in first-seen order over [`Self::list_all`]
    pub fn all_tags(&self) -> Vec<&str> {
        let tags: IndexSet<&str> = self
            .list_all()
            .into_iter()
            .flat_map(|p| p.tags.iter().map(String::as_str))
            .filter(|t| !t.is_empty())
            .collect();
        tags.into_iter().collect()
    }

    /// Distinct tags with their post counts, most used first
    pub fn tag_counts(&self) -> Vec<Tag> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for post in self.list_all() {
            for tag in &post.tags {
                *counts.entry(tag.as_str()).or_insert(0) += 1;
            }
        }

        let mut tags: Vec<Tag> = counts
            .into_iter()
            .map(|(name, count)| Tag::new(name, count))
            .collect();
        tags.sort_by(|a, b| b.count.cmp(&a.count));
        tags
    }

    /// Case-insensitive substring search over title, summary and tags.
    ///
    /// An empty query returns [`Self::list_all`]. Results keep the
    /// date-descending order; there is no relevance ranking.
    pub fn search(&self, query: &str) -> Vec<&Post> {
        if query.is_empty() {
            return self.list_all();
        }

        let needle = query.to_lowercase();
        self.list_all()
            .into_iter()
            .filter(|p| matches_query(p, &needle))
            .collect()
    }

    pub fn stats(&self) -> SiteStats {
        SiteStats {
            posts: self.posts.len(),
            tags: self.all_tags().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

fn matches_query(post: &Post, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle)
        || post.summary.to_lowercase().contains(needle)
        || post.tags.iter().any(|t| t.to_lowercase().contains(needle))
}
