//! Markdown rendering with math, syntax highlighting and link rewriting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use super::{links, math};
use crate::config::{HighlightConfig, MarkdownConfig, RawHtmlPolicy};
use crate::error::{ContentError, Result};
use crate::helpers::html_escape;

const FALLBACK_THEME: &str = "base16-ocean.dark";

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
    markdown: MarkdownConfig,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::from_config(&HighlightConfig::default(), &MarkdownConfig::default())
    }

    /// Create a renderer from the site's rendering settings
    pub fn from_config(highlight: &HighlightConfig, markdown: &MarkdownConfig) -> Self {
        let theme_set = ThemeSet::load_defaults();
        let theme_name = if theme_set.themes.contains_key(&highlight.theme) {
            highlight.theme.clone()
        } else {
            tracing::warn!(
                "Unknown highlight theme {:?}, using {}",
                highlight.theme,
                FALLBACK_THEME
            );
            FALLBACK_THEME.to_string()
        };

        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set,
            theme_name,
            line_numbers: highlight.line_number,
            markdown: markdown.clone(),
        }
    }

    /// Create with custom highlight settings and default markdown settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        let highlight = HighlightConfig {
            theme: theme.to_string(),
            line_number: line_numbers,
        };
        Self::from_config(&highlight, &MarkdownConfig::default())
    }

    fn options(&self) -> Options {
        let mut options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES;
        if self.markdown.math {
            options |= Options::ENABLE_MATH;
        }
        options
    }

    /// Render a post body to an HTML fragment.
    ///
    /// Output depends only on `markdown` and the renderer settings.
    pub fn render(&self, markdown: &str) -> Result<String> {
        validate(markdown)?;

        let parser = Parser::new_ext(markdown, self.options());

        let mut events: Vec<Event> = Vec::new();
        // Some(lang) while inside a code block
        let mut code_block_lang: Option<Option<String>> = None;
        let mut code_block_content = String::new();
        // markup inside an image becomes alt text, so nothing there is rewritten
        let mut image_depth = 0usize;

        for event in parser {
            match event {
                Event::Start(Tag::Image { .. }) => {
                    image_depth += 1;
                    events.push(event);
                }
                Event::End(TagEnd::Image) => {
                    image_depth = image_depth.saturating_sub(1);
                    events.push(event);
                }
                Event::Start(Tag::CodeBlock(kind)) => {
                    code_block_lang = Some(fence_language(&kind));
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let lang = code_block_lang.take().flatten();
                    let highlighted = self.highlight_code(&code_block_content, lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                    code_block_content.clear();
                }
                Event::Text(text) if code_block_lang.is_some() => {
                    code_block_content.push_str(&text);
                }
                Event::InlineMath(tex) | Event::DisplayMath(tex) if image_depth > 0 => {
                    events.push(Event::Text(tex));
                }
                Event::InlineMath(tex) => {
                    events.push(Event::InlineHtml(CowStr::from(math::inline(&tex))));
                }
                Event::DisplayMath(tex) => {
                    events.push(Event::InlineHtml(CowStr::from(math::display(&tex))));
                }
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    ..
                }) if self.markdown.rewrite_links && image_depth == 0 => {
                    let href = match link_type {
                        LinkType::Email => format!("mailto:{}", dest_url),
                        _ => dest_url.to_string(),
                    };
                    let tag = links::open_tag(&href, &title, &self.markdown.link_class);
                    events.push(Event::InlineHtml(CowStr::from(tag)));
                }
                Event::Html(raw) | Event::InlineHtml(raw)
                    if self.markdown.raw_html == RawHtmlPolicy::Escape =>
                {
                    events.push(Event::Text(raw));
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let Some((lang, syntax)) = lang.and_then(|lang| Some((lang, self.find_syntax(lang)?)))
        else {
            return plain_code_block(code);
        };
        let Some(theme) = self.theme_set.themes.get(&self.theme_name) else {
            return plain_code_block(code);
        };

        match self.highlight_lines(code, syntax, theme) {
            Ok(lines) => {
                let lang = html_escape(lang);
                if self.line_numbers {
                    self.add_line_numbers(&lines, &lang)
                } else {
                    format!(
                        r#"<pre class="highlight"{}><code class="language-{}">{}</code></pre>"#,
                        background_style(theme),
                        lang,
                        lines.concat()
                    )
                }
            }
            Err(e) => {
                tracing::warn!("Failed to highlight {} block: {}", lang, e);
                plain_code_block(code)
            }
        }
    }

    fn find_syntax(&self, lang: &str) -> Option<&SyntaxReference> {
        self.syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .filter(|syntax| syntax.name != self.syntax_set.find_syntax_plain_text().name)
    }

    /// Highlight each line to inline-styled spans, newlines kept
    fn highlight_lines(
        &self,
        code: &str,
        syntax: &SyntaxReference,
        theme: &Theme,
    ) -> std::result::Result<Vec<String>, syntect::Error> {
        let mut highlighter = HighlightLines::new(syntax, theme);
        LinesWithEndings::from(code)
            .map(|line| {
                let regions = highlighter.highlight_line(line, &self.syntax_set)?;
                styled_line_to_highlighted_html(&regions[..], IncludeBackground::No)
            })
            .collect()
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, lines: &[String], lang: &str) -> String {
        let gutter = (1..=lines.len())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
            lang,
            gutter,
            lines.concat()
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject input the parser would silently alter
fn validate(markdown: &str) -> Result<()> {
    if let Some(pos) = markdown.find('\0') {
        let line = markdown[..pos].matches('\n').count() + 1;
        return Err(ContentError::render(line, "body contains a NUL character"));
    }
    Ok(())
}

/// Language of a fenced block: first word of the info string
fn fence_language(kind: &CodeBlockKind) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => info
            .split(|c: char| c.is_whitespace() || c == ',' || c == '{')
            .next()
            .filter(|lang| !lang.is_empty())
            .map(str::to_string),
        CodeBlockKind::Indented => None,
    }
}

fn plain_code_block(code: &str) -> String {
    format!(
        r#"<pre><code class="language-plaintext">{}</code></pre>"#,
        html_escape(code)
    )
}

fn background_style(theme: &Theme) -> String {
    theme
        .settings
        .background
        .map(|c| format!(r#" style="background-color:#{:02x}{:02x}{:02x};""#, c.r, c.g, c.b))
        .unwrap_or_default()
}
