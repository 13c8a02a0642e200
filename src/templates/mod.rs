//! Built-in page templates using the Tera template engine
//!
//! The page shell and its pages are embedded in the binary.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::html_escape;

/// Template renderer with the embedded page shell
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Tera's escaping also rewrites `/`, which breaks URLs in attributes;
        // text values go through the `html` filter instead
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("layout.html")),
            ("post.html", include_str!("post.html")),
            ("blogs.html", include_str!("blogs.html")),
            ("404.html", include_str!("404.html")),
        ])?;

        tera.register_filter("html", html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: escape text for HTML content and attributes
fn html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("html", "value", String, value);
    Ok(tera::Value::String(html_escape(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!("{}…", truncated.trim_end())))
    }
}

/// Tera filter: format a `YYYY-MM-DD` date
///
/// `LL` gives the long form, e.g. `June 1, 2024`.
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "YYYY-MM-DD".to_string(),
    };

    if format == "LL" {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
            return Ok(tera::Value::String(date.format("%B %-d, %Y").to_string()));
        }
    }

    Ok(tera::Value::String(s))
}

/// Site-wide values every page shell needs
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub application_name: String,
    pub creator: String,
    pub language: String,
    pub blog_index: String,
    pub math: bool,
    pub year: i32,
}

impl SiteData {
    pub fn new(config: &SiteConfig, year: i32) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            application_name: config.application_name.clone(),
            creator: config.creator.clone(),
            language: config.language.clone(),
            blog_index: config.blog_index_path(),
            math: config.markdown.math,
            year,
        }
    }
}

/// A post as the templates see it
#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub slug: String,
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    pub path: String,
    pub cover_image: Option<String>,
}

impl PostData {
    pub fn new(config: &SiteConfig, post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            description: post.description.clone(),
            date: post.date.map(|d| d.format("%Y-%m-%d").to_string()),
            path: config.post_path(&post.slug),
            cover_image: post.cover_image_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> Context {
        let mut context = Context::new();
        context.insert("site", &SiteData::new(&SiteConfig::default(), 2025));
        context.insert("head", "<title>T</title>");
        context
    }

    #[test]
    fn test_post_page() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = context();
        context.insert(
            "post",
            &PostData {
                slug: "bert".to_string(),
                title: "BERT <explained>".to_string(),
                description: String::new(),
                date: Some("2024-06-01".to_string()),
                path: "/blogs/bert/".to_string(),
                cover_image: Some("/images/blogs/bert/cover.png".to_string()),
            },
        );
        context.insert("content", "<p>Body</p>");

        let html = renderer.render("post.html", &context).unwrap();
        assert!(html.contains("<title>T</title>"));
        assert!(html.contains("<h1>BERT &lt;explained&gt;</h1>"));
        assert!(html.contains("June 1, 2024"));
        assert!(html.contains(r#"src="/images/blogs/bert/cover.png""#));
        assert!(html.contains("<p>Body</p>"));
        assert!(html.contains(r#"<a href="/blogs/" data-link="internal">"#));
        assert!(html.contains("katex.min.js"));
    }

    #[test]
    fn test_blog_index_empty() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = context();
        context.insert("posts", &Vec::<PostData>::new());
        let html = renderer.render("blogs.html", &context).unwrap();
        assert!(html.contains("No posts yet."));
    }

    #[test]
    fn test_math_scripts_follow_config() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut config = SiteConfig::default();
        config.markdown.math = false;
        let mut context = Context::new();
        context.insert("site", &SiteData::new(&config, 2025));
        context.insert("head", "");
        let html = renderer.render("404.html", &context).unwrap();
        assert!(!html.contains("katex"));
        assert!(html.contains("<h1>404</h1>"));
    }

    #[test]
    fn test_truncate_chars() {
        let mut args = HashMap::new();
        args.insert("length".to_string(), tera::Value::from(3));
        let out = truncate_chars_filter(&tera::Value::from("abcdef"), &args).unwrap();
        assert_eq!(out, tera::Value::from("abc…"));
    }
}
