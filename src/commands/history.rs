//! Show or clear the search history

use anyhow::Result;

use crate::history::{HistoryStore, SearchHistory};
use crate::Folio;

pub fn run(folio: &Folio, clear: bool) -> Result<()> {
    let mut history = folio.search_history();
    if clear {
        history.clear()?;
        println!("Search history cleared");
        return Ok(());
    }
    print!("{}", render(&history));
    Ok(())
}

pub fn render<S: HistoryStore>(history: &SearchHistory<S>) -> String {
    if history.is_empty() {
        return "No search history\n".to_string();
    }

    let mut out = format!("Search history ({}):\n", history.entries().len());
    for (i, query) in history.entries().iter().enumerate() {
        out.push_str(&format!("  {:>2}. {}\n", i + 1, query));
    }
    out
}
