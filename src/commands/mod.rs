//! CLI commands
//!
//! Each command renders its view into a `String` and `run` prints it, so the
//! output can be checked in tests.

pub mod about;
pub mod archive;
pub mod history;
pub mod list;
pub mod search;
pub mod show;

use crate::content::Post;
use crate::helpers::format_date;
use crate::Folio;

/// One-line listing entry: date, title, id and tags
pub(crate) fn post_line(folio: &Folio, post: &Post) -> String {
    let mut line = format!(
        "  {} - {} [{}]",
        format_date(&post.date, &folio.config.date_format),
        post.title,
        post.route()
    );
    if !post.tags.is_empty() {
        line.push_str(&format!(" #{}", post.tags.join(" #")));
    }
    line
}

/// Listing of `posts` under a heading, or a placeholder when there are none
pub(crate) fn post_list(folio: &Folio, heading: &str, posts: &[&Post]) -> String {
    if posts.is_empty() {
        return format!("{} (0):\n  No posts found\n", heading);
    }

    let mut out = format!("{} ({}):\n", heading, posts.len());
    for post in posts {
        out.push_str(&post_line(folio, post));
        out.push('\n');
    }
    out
}

#[cfg(test)]
pub(crate) fn test_folio() -> Folio {
    let dir = std::env::temp_dir();
    Folio::with_config(dir, crate::config::SiteConfig::default()).unwrap()
}
