//! Post detail view

use anyhow::Result;

use crate::comments::CommentThread;
use crate::content::{MarkdownRenderer, Post, PostId};
use crate::helpers::{format_date, relative_date};
use crate::Folio;

/// Show a post addressed by id or `/post/{id}` route
pub fn run(folio: &Folio, target: &str, html: bool, comments: &[String]) -> Result<()> {
    let id = PostId::from_route(target)?;

    let Some(post) = folio.index.get(id) else {
        println!("Post {} not found", id);
        return Ok(());
    };

    print!("{}", render(folio, post, html));

    if !comments.is_empty() {
        let mut thread = CommentThread::new(post.id, folio.config.guest_name.clone());
        for comment in comments {
            if thread.submit(comment).is_none() {
                tracing::warn!("Skipping empty comment");
            }
        }
        print!("{}", render_comments(&thread));
    }

    Ok(())
}

pub fn render(folio: &Folio, post: &Post, html: bool) -> String {
    let mut out = format!("{}\n", post.title);
    out.push_str(&format!(
        "{} | {} ({}) | {} read | {} views | {} likes\n",
        post.author,
        format_date(&post.date, &folio.config.date_format),
        relative_date(&post.date),
        post.read_time,
        post.views,
        post.likes
    ));
    if !post.tags.is_empty() {
        out.push_str(&format!("#{}\n", post.tags.join(" #")));
    }

    let headings = MarkdownRenderer::headings(&post.content);
    if headings.len() > 1 {
        out.push_str("\nContents:\n");
        for (level, text) in headings {
            let indent = "  ".repeat(level.saturating_sub(1) as usize);
            out.push_str(&format!("  {}- {}\n", indent, text));
        }
    }

    out.push('\n');
    if html {
        out.push_str(&MarkdownRenderer::from_config(&folio.config.highlight).render(&post.content));
    } else {
        out.push_str(post.content.trim_end());
        out.push('\n');
    }

    let listing = folio.index.list_all();
    if let Some(prev) = post.prev(&listing) {
        out.push_str(&format!("\n<- Newer: {} ({})\n", prev.title, prev.route()));
    }
    if let Some(next) = post.next(&listing) {
        out.push_str(&format!("-> Older: {} ({})\n", next.title, next.route()));
    }

    out
}

pub fn render_comments(thread: &CommentThread) -> String {
    let mut out = format!("\nComments ({}):\n", thread.len());
    for comment in thread.comments() {
        out.push_str(&format!(
            "  {} [{}]: {}\n",
            comment.author,
            comment.datetime.format("%Y-%m-%d %H:%M:%S"),
            comment.content
        ));
    }
    out
}
