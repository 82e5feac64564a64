//! About page: profile, skills and site totals

use anyhow::Result;

use crate::Folio;

pub fn run(folio: &Folio) -> Result<()> {
    print!("{}", render(folio));
    Ok(())
}

pub fn render(folio: &Folio) -> String {
    let about = &folio.config.about;
    let name = if about.name.is_empty() {
        &folio.config.author
    } else {
        &about.name
    };

    let mut out = format!("{}\n", name);
    if !about.role.is_empty() {
        out.push_str(&format!("{}\n", about.role));
    }
    if !about.bio.is_empty() {
        out.push_str(&format!("\n{}\n", about.bio.trim()));
    }

    if !about.contacts.is_empty() {
        out.push_str("\nContact:\n");
        for (label, value) in &about.contacts {
            out.push_str(&format!("  {}: {}\n", label, value));
        }
    }

    if !about.skills.is_empty() {
        out.push_str("\nSkills:\n");
        for (group, skills) in &about.skills {
            out.push_str(&format!("  {}: {}\n", group, skills.join(", ")));
        }
    }

    let stats = folio.index.stats();
    out.push_str(&format!("\nPosts: {}  Tags: {}\n", stats.posts, stats.tags));

    let recent = folio.index.recent(folio.config.recent_limit);
    if !recent.is_empty() {
        out.push_str("\nRecent posts:\n");
        for post in recent {
            out.push_str(&format!("  {} ({})\n", post.title, post.route()));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_folio;

    #[test]
    fn test_render_defaults() {
        let folio = test_folio();
        let out = render(&folio);
        assert!(out.starts_with("戴振朋\n"));
        assert!(out.contains("Posts: 4  Tags: 9"));
        assert!(out.contains("Recent posts:\n  React 集成 TOAST UI Calendar"));
    }

    #[test]
    fn test_render_profile() {
        let mut folio = test_folio();
        folio.config.about.name = "Jane".to_string();
        folio.config.about.role = "Frontend engineer".to_string();
        folio
            .config
            .about
            .skills
            .insert("Frameworks".to_string(), vec!["Vue".to_string(), "React".to_string()]);
        folio
            .config
            .about
            .contacts
            .insert("Mail".to_string(), "jane@example.com".to_string());

        let out = render(&folio);
        assert!(out.starts_with("Jane\nFrontend engineer\n"));
        assert!(out.contains("  Frameworks: Vue, React\n"));
        assert!(out.contains("  Mail: jane@example.com\n"));
    }
}
