//! Markdown rendering for the post detail view

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::from_config(&HighlightConfig::default())
    }

    /// Create a renderer using the site's highlight settings
    pub fn from_config(config: &HighlightConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: config.theme.clone(),
            line_numbers: config.line_number,
        }
    }

    /// Render markdown (GFM flavoured) to HTML
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        // Some(lang) while inside a fenced block that gets highlighted
        let mut fenced: Option<String> = None;
        let mut code = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(lang))) if !lang.is_empty() => {
                    let lang = lang.split_whitespace().next().unwrap_or_default();
                    fenced = Some(lang.to_string());
                    code.clear();
                }
                Event::End(TagEnd::CodeBlock) if fenced.is_some() => {
                    let lang = fenced.take().unwrap_or_default();
                    let block = self.highlight_code(code.trim_end_matches('\n'), &lang);
                    events.push(Event::Html(CowStr::from(block)));
                }
                Event::Text(text) if fenced.is_some() => {
                    code.push_str(&text);
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Highlight a code block, with a language caption above it
    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let body = match theme.map(|t| highlighted_html_for_string(code, &self.syntax_set, syntax, t)) {
            Some(Ok(highlighted)) if self.line_numbers => add_line_numbers(&highlighted),
            Some(Ok(highlighted)) => highlighted,
            _ => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                html_escape(lang),
                html_escape(code)
            ),
        };

        format!(
            r#"<figure class="code-block"><figcaption class="code-lang">{}</figcaption>{}</figure>"#,
            html_escape(lang),
            body
        )
    }

    /// Collect `(level, text)` for every heading, for a table of contents
    pub fn headings(markdown: &str) -> Vec<(u8, String)> {
        let mut headings = Vec::new();
        let mut current: Option<(u8, String)> = None;

        for event in Parser::new(markdown) {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    current = Some((level as u8, String::new()));
                }
                Event::Text(text) | Event::Code(text) => {
                    if let Some((_, buf)) = current.as_mut() {
                        buf.push_str(&text);
                    }
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(heading) = current.take() {
                        headings.push(heading);
                    }
                }
                _ => {}
            }
        }

        headings
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Number each line of highlighted output
fn add_line_numbers(code: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();

    let gutter = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table>"#,
        gutter,
        lines.join("\n")
    )
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_fenced_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains(r#"<figcaption class="code-lang">rust</figcaption>"#));
        assert!(html.contains("line-number"));
        assert!(!html.contains("```"));
    }

    #[test]
    fn test_unlabelled_code_block_left_plain() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\nplain text\n```");
        assert!(html.contains("<pre><code>plain text"));
        assert!(!html.contains("code-lang"));
    }

    #[test]
    fn test_render_without_line_numbers() {
        let config = HighlightConfig {
            line_number: false,
            ..Default::default()
        };
        let renderer = MarkdownRenderer::from_config(&config);
        let html = renderer.render("```js\nlet a = 1;\n```");
        assert!(!html.contains("line-number"));
        assert!(html.contains("code-lang"));
    }

    #[test]
    fn test_plain_fallback_escapes_language() {
        let mut renderer = MarkdownRenderer::new();
        renderer.theme_set = ThemeSet::new();

        let html = renderer.highlight_code("a < b", "x\"><script>");
        assert!(html.contains(r#"<code class="language-x&quot;&gt;&lt;script&gt;">"#));
        assert!(html.contains("a &lt; b"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_gfm_table() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_headings() {
        let md = "# 标题\n\ntext\n\n## 小节 `code`\n";
        let headings = MarkdownRenderer::headings(md);
        assert_eq!(
            headings,
            vec![(1, "标题".to_string()), (2, "小节 code".to_string())]
        );
    }
}
