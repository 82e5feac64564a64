//! List site content

use anyhow::Result;

use super::post_list;
use crate::index::{sort_posts, SortOrder};
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str, order: SortOrder) -> Result<()> {
    print!("{}", render(folio, content_type, order)?);
    Ok(())
}

pub fn render(folio: &Folio, content_type: &str, order: SortOrder) -> Result<String> {
    let index = &folio.index;

    let out = match content_type {
        "post" | "posts" => {
            let mut posts = index.list_all();
            sort_posts(&mut posts, order);
            post_list(folio, "Posts", &posts)
        }
        "recent" => post_list(folio, "Recent", &index.recent(folio.config.recent_limit)),
        "tag" | "tags" => {
            let tags = index.tag_counts();
            let mut out = format!("Tags ({}):\n", tags.len());
            for tag in tags {
                out.push_str(&format!("  {} ({}) [{}]\n", tag.name, tag.count, tag.slug));
            }
            out
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, recent, tag",
                content_type
            );
        }
    };

    Ok(out)
}

/// Posts carrying a tag
pub fn run_tag(folio: &Folio, tag: &str) -> Result<()> {
    let posts = folio.index.find_by_tag(tag);
    print!("{}", post_list(folio, &format!("Tag #{}", tag), &posts));
    Ok(())
}
