//! Archive view grouped by month

use anyhow::Result;

use super::post_line;
use crate::archive::{self, ArchiveFilter};
use crate::Folio;

pub fn run(folio: &Folio, selection: ArchiveFilter) -> Result<()> {
    print!("{}", render(folio, selection));
    Ok(())
}

pub fn render(folio: &Folio, selection: ArchiveFilter) -> String {
    let all = folio.index.list_all();
    let posts = archive::filter(&all, selection);

    let years = archive::years(&all)
        .iter()
        .map(|y| y.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = format!("Archive [{}] (years: {})\n", selection, years);
    out.push_str(&format!("{} posts\n", posts.len()));

    for month in archive::group_by_month(&posts) {
        out.push_str(&format!("\n{} ({})\n", month.key, month.label()));
        for post in &month.posts {
            out.push_str(&post_line(folio, post));
            out.push_str(&format!(" ({} views, {} likes)\n", post.views, post.likes));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_folio;

    #[test]
    fn test_archive_all() {
        let folio = test_folio();
        let out = render(&folio, ArchiveFilter::All);
        assert!(out.starts_with("Archive [all] (years: 2024)\n4 posts\n"));

        let november = out.find("2024-11 (November 2024)").unwrap();
        let march = out.find("2024-03 (March 2024)").unwrap();
        assert!(november < march);
        assert!(out.contains("(95 views, 35 likes)"));
    }

    #[test]
    fn test_archive_other_year_empty() {
        let folio = test_folio();
        let out = render(&folio, ArchiveFilter::Year(2023));
        assert!(out.contains("0 posts"));
        assert!(!out.contains("2024-03 ("));
    }
}
