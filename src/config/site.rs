//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub application_name: String,
    pub creator: String,
    pub twitter: String,
    pub keywords: Vec<String>,
    pub authors: Vec<Author>,
    pub language: String,

    // URL
    /// Canonical origin, stored without a trailing slash
    pub base_url: String,
    pub blog_route: String,
    pub cover_image: String,
    pub robots: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    pub static_dir: String,

    // Rendering
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub markdown: MarkdownConfig,
    #[serde(default)]
    pub sitemap: SitemapConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blogs".to_string(),
            description: "Blogs and articles".to_string(),
            application_name: "Folio".to_string(),
            creator: "John Doe".to_string(),
            twitter: String::new(),
            keywords: Vec::new(),
            authors: Vec::new(),
            language: "en".to_string(),

            base_url: "https://example.com".to_string(),
            blog_route: "blogs".to_string(),
            cover_image: "cover.png".to_string(),
            robots: "index, follow, max-image-preview:large, max-snippet:-1, max-video-preview:-1"
                .to_string(),

            content_dir: "blogs".to_string(),
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            highlight: HighlightConfig::default(),
            markdown: MarkdownConfig::default(),
            sitemap: SitemapConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!("Loaded configuration from {:?}", path.as_ref());
        Ok(config)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file deserializes to unit, not to a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: SiteConfig = serde_yaml::from_str(content)?;
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        config.blog_route = config.blog_route.trim_matches('/').to_string();
        Ok(config)
    }

    /// Site-relative path of a post page, e.g. `/blogs/my-post/`
    pub fn post_path(&self, slug: &str) -> String {
        format!("/{}/{}/", self.blog_route, slug)
    }

    /// Site-relative path of the blog index
    pub fn blog_index_path(&self) -> String {
        format!("/{}/", self.blog_route)
    }

    /// Static routes listed in the sitemap
    pub fn static_routes(&self) -> Vec<StaticRoute> {
        match &self.sitemap.static_routes {
            Some(routes) => routes.clone(),
            None => vec![
                StaticRoute::new("/", ChangeFreq::Daily, 1.0),
                StaticRoute::new("/work/", ChangeFreq::Weekly, 0.8),
                StaticRoute::new(&self.blog_index_path(), ChangeFreq::Daily, 0.9),
                StaticRoute::new("/photos/", ChangeFreq::Monthly, 0.6),
            ],
        }
    }
}

/// A credited author of the site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Name of a syntect theme
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// What to do with raw HTML found in post bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawHtmlPolicy {
    /// Pass through verbatim; bodies are written by the site owner
    #[default]
    Trusted,
    /// Emit as escaped text
    Escape,
}

/// Markdown rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    pub raw_html: RawHtmlPolicy,
    pub math: bool,
    pub rewrite_links: bool,
    pub link_class: String,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            raw_html: RawHtmlPolicy::Trusted,
            math: true,
            rewrite_links: true,
            link_class: "underline underline-offset-2 hover:no-underline".to_string(),
        }
    }
}

/// How often a sitemap location is expected to change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

/// A non-post page listed in the sitemap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticRoute {
    /// Site-relative path, `/` for the home page
    pub path: String,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

impl StaticRoute {
    pub fn new(path: &str, changefreq: ChangeFreq, priority: f32) -> Self {
        Self {
            path: path.to_string(),
            changefreq,
            priority,
        }
    }
}

/// Sitemap configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    pub post_changefreq: ChangeFreq,
    pub post_priority: f32,
    /// Non-post pages; unset lists the home, work, blog index and photos pages
    pub static_routes: Option<Vec<StaticRoute>>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            post_changefreq: ChangeFreq::Monthly,
            post_priority: 0.7,
            static_routes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "blogs");
        assert_eq!(config.markdown.raw_html, RawHtmlPolicy::Trusted);
        assert!(config.markdown.math);
        assert_eq!(config.static_routes().len(), 4);
        assert_eq!(config.post_path("hello"), "/blogs/hello/");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
base_url: https://vatsal.example/
keywords:
  - AI
  - LLM
authors:
  - name: Jane
    url: https://jane.example/
highlight:
  theme: InspiredGitHub
markdown:
  raw_html: escape
sitemap:
  static_routes:
    - path: /
      changefreq: daily
      priority: 1.0
"#;
        let config = SiteConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.base_url, "https://vatsal.example");
        assert_eq!(config.keywords, vec!["AI", "LLM"]);
        assert_eq!(config.authors[0].url.as_deref(), Some("https://jane.example/"));
        assert_eq!(config.highlight.theme, "InspiredGitHub");
        assert_eq!(config.markdown.raw_html, RawHtmlPolicy::Escape);
        // untouched sections keep their defaults
        assert!(config.markdown.rewrite_links);
        assert_eq!(config.static_routes().len(), 1);
        assert_eq!(config.sitemap.post_changefreq, ChangeFreq::Monthly);
    }

    #[test]
    fn test_empty_config() {
        let config = SiteConfig::from_yaml("  \n").unwrap();
        assert_eq!(config.public_dir, "public");
    }

    #[test]
    fn test_blog_route_is_trimmed() {
        let config = SiteConfig::from_yaml("blog_route: /writing/\n").unwrap();
        assert_eq!(config.blog_index_path(), "/writing/");
        assert_eq!(config.post_path("a"), "/writing/a/");
    }

    #[test]
    fn test_default_routes_follow_blog_route() {
        let config = SiteConfig::from_yaml("blog_route: writing\n").unwrap();
        let paths: Vec<String> = config.static_routes().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/", "/work/", "/writing/", "/photos/"]);
    }
}
