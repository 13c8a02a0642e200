//! folio-rs: a portfolio blog generator
//!
//! Posts are markdown files with a YAML header. They are loaded by slug,
//! rendered to HTML with math, syntax highlighting and link rewriting, and
//! written out as a static site with SEO metadata and a sitemap.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod seo;
pub mod server;
pub mod templates;

pub use error::{ContentError, Result};

use std::path::{Path, PathBuf};

/// The main application: a site directory and its configuration
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown post directory
    pub content_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Files copied verbatim into the public directory
    pub static_dir: PathBuf,
}

impl Folio {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> anyhow::Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
            static_dir,
        }
    }

    /// The content store over the post directory
    pub fn store(&self) -> content::ContentStore {
        content::ContentStore::new(&self.content_dir)
    }

    /// A markdown renderer configured for this site
    pub fn renderer(&self) -> content::MarkdownRenderer {
        content::MarkdownRenderer::from_config(&self.config.highlight, &self.config.markdown)
    }

    /// Generate the static site
    pub fn generate(&self) -> anyhow::Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> anyhow::Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, slug: Option<&str>, draft: bool) -> anyhow::Result<PathBuf> {
        commands::new::create_post(self, title, slug, draft)
    }
}
