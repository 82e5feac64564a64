//! CLI entry point for folio-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_rs::archive::ArchiveFilter;
use folio_rs::index::SortOrder;

#[derive(Parser)]
#[command(name = "folio-rs")]
#[command(version)]
#[command(about = "Browse, search and archive the posts of a personal blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List site content
    #[command(alias = "ls")]
    List {
        /// Type of content to list (post, recent, tag)
        #[arg(default_value = "post")]
        r#type: String,

        /// Sort order: newest or oldest
        #[arg(short, long, default_value = "newest")]
        sort: SortOrder,
    },

    /// Show a single post
    Show {
        /// Post id or route, e.g. `3` or `/post/3`
        target: String,

        /// Render the markdown to HTML
        #[arg(long)]
        html: bool,

        /// Leave a comment (repeatable; kept for this run only)
        #[arg(long = "comment")]
        comments: Vec<String>,
    },

    /// Search titles, summaries and tags
    #[command(alias = "s")]
    Search {
        /// Case-insensitive search text
        #[arg(default_value = "")]
        query: String,

        /// Sort order: newest or oldest
        #[arg(short, long, default_value = "newest")]
        sort: SortOrder,
    },

    /// Posts carrying a tag (exact match)
    Tag {
        tag: String,
    },

    /// Posts grouped by month
    Archive {
        /// Year to show, or `all`
        #[arg(short, long, default_value = "all")]
        year: ArchiveFilter,
    },

    /// Show or clear the search history
    History {
        #[arg(long)]
        clear: bool,
    },

    /// Profile and site totals
    About,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio_rs=debug,info"
    } else {
        "folio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::List { r#type, sort } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::list::run(&folio, &r#type, sort)?;
        }

        Commands::Show {
            target,
            html,
            comments,
        } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::show::run(&folio, &target, html, &comments)?;
        }

        Commands::Search { query, sort } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::search::run(&folio, &query, sort)?;
        }

        Commands::Tag { tag } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::list::run_tag(&folio, &tag)?;
        }

        Commands::Archive { year } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::archive::run(&folio, year)?;
        }

        Commands::History { clear } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::history::run(&folio, clear)?;
        }

        Commands::About => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::about::run(&folio)?;
        }

        Commands::Version => {
            println!("folio-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
