//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use std::collections::HashMap;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::helpers::is_internal_link;

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
        Self::with_options("base16-ocean.dark", false)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    /// Render a document body to HTML
    pub fn render(&self, markdown: &str) -> String {
        // Front-matter is split off by the repository, so no metadata blocks here
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let events = self.rewrite_blocks(parser);
        let events = anchor_headings(events);

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Highlight code blocks, open external links in a new tab, wrap tables
    /// and size images to the column
    fn rewrite_blocks<'a>(&self, parser: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
        let mut events: Vec<Event> = Vec::new();

        let mut in_code_block = false;
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();

        // One entry per open link: true when the opening tag was rewritten
        let mut link_stack: Vec<bool> = Vec::new();

        let mut image: Option<(String, String)> = None;
        let mut image_alt = String::new();

        for event in parser {
            if in_code_block {
                match event {
                    Event::End(TagEnd::CodeBlock) => {
                        let highlighted =
                            self.highlight_code(&code_block_content, code_block_lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                        in_code_block = false;
                        code_block_lang = None;
                    }
                    Event::Text(text) => code_block_content.push_str(&text),
                    _ => {}
                }
                continue;
            }

            if image.is_some() {
                match event {
                    Event::End(TagEnd::Image) => {
                        if let Some((src, title)) = image.take() {
                            events.push(Event::Html(CowStr::from(image_tag(
                                &src, &image_alt, &title,
                            ))));
                        }
                        image_alt.clear();
                    }
                    Event::Text(text) | Event::Code(text) => image_alt.push_str(&text),
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_block_content.clear();
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(lang) => {
                            // Keep only the language token of info strings like "rust title=x"
                            let lang = lang.split_whitespace().next().unwrap_or("").to_string();
                            if lang.is_empty() {
                                None
                            } else {
                                Some(lang)
                            }
                        }
                        CodeBlockKind::Indented => None,
                    };
                }
                Event::Start(Tag::Link {
                    dest_url, title, ..
                }) if !is_internal_link(&dest_url) => {
                    let title_attr = if title.is_empty() {
                        String::new()
                    } else {
                        format!(r#" title="{}""#, html_escape(&title))
                    };
                    events.push(Event::Html(CowStr::from(format!(
                        r#"<a href="{}"{} target="_blank" rel="noopener noreferrer">"#,
                        html_escape(&dest_url),
                        title_attr
                    ))));
                    link_stack.push(true);
                }
                Event::Start(Tag::Link { .. }) => {
                    events.push(event);
                    link_stack.push(false);
                }
                Event::End(TagEnd::Link) => {
                    if link_stack.pop().unwrap_or(false) {
                        events.push(Event::Html(CowStr::from("</a>")));
                    } else {
                        events.push(event);
                    }
                }
                Event::Start(Tag::Table(_)) => {
                    events.push(Event::Html(CowStr::from("<div class=\"table-container\">\n")));
                    events.push(event);
                }
                Event::End(TagEnd::Table) => {
                    events.push(event);
                    events.push(Event::Html(CowStr::from("</div>\n")));
                }
                Event::Start(Tag::Image {
                    dest_url, title, ..
                }) => {
                    image = Some((dest_url.to_string(), title.to_string()));
                }
                _ => events.push(event),
            }
        }

        events
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

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

        let highlighted = theme.and_then(|theme| {
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(highlighted) if self.line_numbers => self.add_line_numbers(&highlighted, lang),
            Some(highlighted) => format!(
                r#"<figure class="highlight {}">{}</figure>"#,
                html_escape(lang),
                highlighted
            ),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                html_escape(lang),
                html_escape(code)
            ),
        }
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();

        let gutter = (1..=lines.len())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
            html_escape(lang),
            gutter,
            lines.join("\n")
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Give every heading a unique id and a self-link anchor
fn anchor_headings(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut output = Vec::with_capacity(events.len());
    let mut used_ids: HashMap<String, usize> = HashMap::new();

    // (level, explicit id, inner events, plain text)
    let mut heading: Option<(HeadingLevel, Option<String>, Vec<Event>, String)> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                heading = Some((level, id.map(|id| id.to_string()), Vec::new(), String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                let Some((level, explicit_id, inner, text)) = heading.take() else {
                    continue;
                };
                let base = explicit_id.unwrap_or_else(|| slug::slugify(&text));
                let id = unique_id(&mut used_ids, base);
                let tag = heading_tag(level);
                output.push(Event::Html(CowStr::from(format!(
                    r##"<{tag} id="{id}"><a class="anchor" aria-hidden="true" tabindex="-1" href="#{id}"></a>"##,
                    tag = tag,
                    id = html_escape(&id)
                ))));
                output.extend(inner);
                output.push(Event::Html(CowStr::from(format!("</{}>\n", tag))));
            }
            event => match heading.as_mut() {
                Some((_, _, inner, text)) => {
                    if let Event::Text(t) | Event::Code(t) = &event {
                        text.push_str(t);
                    }
                    inner.push(event);
                }
                None => output.push(event),
            },
        }
    }

    output
}

/// Suffix repeated ids with -1, -2, ...
fn unique_id(used: &mut HashMap<String, usize>, base: String) -> String {
    let base = if base.is_empty() {
        "section".to_string()
    } else {
        base
    };
    let count = used.entry(base.clone()).or_insert(0);
    let id = if *count == 0 {
        base
    } else {
        format!("{}-{}", base, count)
    };
    *count += 1;
    id
}

fn heading_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
}

fn image_tag(src: &str, alt: &str, title: &str) -> String {
    let title_attr = if title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, html_escape(title))
    };
    format!(
        r#"<img src="{}" alt="{}"{} loading="lazy" style="width: 100%; height: auto" />"#,
        html_escape(src),
        html_escape(alt),
        title_attr
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
        let html = renderer.render("This is a test.");
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_headings_get_ids_and_anchors() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("## Write Path\n\n## Write Path\n");
        assert!(html.contains(r#"<h2 id="write-path">"#));
        assert!(html.contains(r##"href="#write-path""##));
        assert!(html.contains(r#"<h2 id="write-path-1">"#));
        assert!(html.contains("Write Path</h2>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains("highlight rust"));
        assert!(!html.contains("```"));
    }

    #[test]
    fn test_render_code_block_with_line_numbers() {
        let renderer = MarkdownRenderer::with_options("base16-ocean.dark", true);
        let html = renderer.render("```\na\nb\n```");
        assert!(html.contains(r#"<span class="line-number">2</span>"#));
    }

    #[test]
    fn test_external_links_open_in_new_tab() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("[radar](https://radar.com) and [home](/writing)");
        assert!(html.contains(
            r#"<a href="https://radar.com" target="_blank" rel="noopener noreferrer">radar</a>"#
        ));
        assert!(html.contains(r#"<a href="/writing">home</a>"#));
    }

    #[test]
    fn test_tables_are_wrapped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<div class=\"table-container\">\n<table>"));
        assert!(html.contains("</table>\n</div>"));
    }

    #[test]
    fn test_images_fill_width() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("![A *tree*](/images/tree.png)");
        assert!(html.contains(r#"<img src="/images/tree.png" alt="A tree""#));
        assert!(html.contains("width: 100%"));
    }
}
