//! Search posts and remember the query

use anyhow::Result;

use super::post_list;
use crate::history::{HistoryStore, SearchHistory};
use crate::index::{sort_posts, SortOrder};
use crate::Folio;

pub fn run(folio: &Folio, query: &str, order: SortOrder) -> Result<()> {
    let mut history = folio.search_history();
    print!("{}", search(folio, &mut history, query, order)?);
    Ok(())
}

/// Record `query` in `history` and render the matching posts
pub fn search<S: HistoryStore>(
    folio: &Folio,
    history: &mut SearchHistory<S>,
    query: &str,
    order: SortOrder,
) -> Result<String> {
    if let Err(e) = history.record(query) {
        tracing::warn!("Failed to save search history: {}", e);
    }

    // A blank query shows the whole feed
    let blank = query.trim().is_empty();
    let mut posts = if blank {
        folio.index.list_all()
    } else {
        folio.index.search(query)
    };
    sort_posts(&mut posts, order);
    tracing::info!("Search {:?} matched {} posts", query, posts.len());

    let heading = if blank {
        "Posts".to_string()
    } else {
        format!("Results for \"{}\"", query)
    };
    Ok(post_list(folio, &heading, &posts))
}
