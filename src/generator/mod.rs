//! Generator module - writes the static site using built-in Tera templates

pub mod sitemap;

use anyhow::Result;
use chrono::{DateTime, Datelike, Utc};
use std::fs;
use std::path::Path;

use tera::Context;
use walkdir::WalkDir;

use crate::content::{MarkdownRenderer, Post};
use crate::seo::{generate_metadata, MetadataArgs};
use crate::templates::{PostData, SiteData, TemplateRenderer};
use crate::Folio;

/// Static site generator using Tera templates
pub struct Generator {
    folio: Folio,
    templates: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        Ok(Self {
            folio: folio.clone(),
            templates: TemplateRenderer::new()?,
            markdown: folio.renderer(),
        })
    }

    /// Generate the entire site
    pub fn generate(&self) -> Result<()> {
        self.generate_at(Utc::now())
    }

    /// Generate the entire site, stamping undated entries with `now`
    pub fn generate_at(&self, now: DateTime<Utc>) -> Result<()> {
        let posts = self.folio.store().load_active_posts()?;
        tracing::info!("Loaded {} active posts", posts.len());

        // pages of deactivated or deleted posts must not outlive them
        self.reset_public_dir()?;
        self.copy_static_assets()?;

        let site = SiteData::new(&self.folio.config, now.year());

        let mut published = Vec::with_capacity(posts.len());
        let mut failed = 0;
        for post in &posts {
            match self.generate_post_page(post, &site) {
                Ok(()) => published.push(post.clone()),
                Err(e) => {
                    tracing::error!("Failed to generate post {}: {:#}", post.slug, e);
                    failed += 1;
                }
            }
        }
        tracing::info!("Generated {} post pages", published.len());

        self.generate_blog_index(&published, &site)?;
        self.generate_not_found_page(&site)?;
        self.generate_sitemap(&published, now)?;

        if failed > 0 {
            anyhow::bail!("{} of {} post pages failed to render", failed, posts.len());
        }

        Ok(())
    }

    /// Render one post into `{blog_route}/{slug}/index.html`
    fn generate_post_page(&self, post: &Post, site: &SiteData) -> Result<()> {
        let config = &self.folio.config;
        let content = self.markdown.render(&post.body)?;

        let data = PostData::new(config, post);
        let args = MetadataArgs::new(&data.path, &post.title, &post.description)
            .with_image(data.cover_image.clone());
        let head = generate_metadata(config, &args).to_html();

        let mut context = Context::new();
        context.insert("site", site);
        context.insert("head", &head);
        context.insert("post", &data);
        context.insert("content", &content);

        let html = self.templates.render("post.html", &context)?;
        self.write_page(&data.path, &html)?;
        tracing::debug!("Generated post: {}", data.path);

        Ok(())
    }

    /// Generate the blog index listing every published post
    fn generate_blog_index(&self, posts: &[Post], site: &SiteData) -> Result<()> {
        let config = &self.folio.config;
        let path = config.blog_index_path();
        let args = MetadataArgs::new(&path, &config.title, &config.description);
        let posts: Vec<PostData> = posts.iter().map(|p| PostData::new(config, p)).collect();

        let mut context = Context::new();
        context.insert("site", site);
        context.insert("head", &generate_metadata(config, &args).to_html());
        context.insert("posts", &posts);

        let html = self.templates.render("blogs.html", &context)?;
        self.write_page(&path, &html)?;
        tracing::info!("Generated blog index");

        Ok(())
    }

    fn generate_not_found_page(&self, site: &SiteData) -> Result<()> {
        let config = &self.folio.config;
        let args = MetadataArgs::new("/404.html", "Page not found", &config.description);

        let mut context = Context::new();
        context.insert("site", site);
        context.insert("head", &generate_metadata(config, &args).to_html());

        let html = self.templates.render("404.html", &context)?;
        fs::write(self.folio.public_dir.join("404.html"), html)?;

        Ok(())
    }

    /// Generate sitemap.xml and robots.txt
    fn generate_sitemap(&self, posts: &[Post], now: DateTime<Utc>) -> Result<()> {
        let config = &self.folio.config;
        let entries = sitemap::build(config, posts, now);

        fs::write(
            self.folio.public_dir.join("sitemap.xml"),
            sitemap::to_xml(&entries),
        )?;
        fs::write(
            self.folio.public_dir.join("robots.txt"),
            sitemap::robots_txt(config),
        )?;
        tracing::info!("Generated sitemap.xml with {} urls", entries.len());

        Ok(())
    }

    /// Start the output from an empty public directory
    fn reset_public_dir(&self) -> Result<()> {
        let public_dir = &self.folio.public_dir;
        if public_dir.exists() {
            fs::remove_dir_all(public_dir)
                .map_err(|e| anyhow::anyhow!("Failed to clear {:?}: {}", public_dir, e))?;
            tracing::debug!("Cleared {:?}", public_dir);
        }
        fs::create_dir_all(public_dir)?;
        Ok(())
    }

    /// Write `html` as the index file of a site-relative directory path
    fn write_page(&self, path: &str, html: &str) -> Result<()> {
        // Strip leading slash from path to avoid creating absolute paths
        let clean_path = path.trim_matches('/');
        let output_path = self.folio.public_dir.join(clean_path).join("index.html");
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
        }
        fs::write(&output_path, html)
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
        Ok(())
    }

    /// Copy the static directory verbatim into the public directory
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.folio.static_dir;
        if !static_dir.exists() {
            tracing::debug!("No static directory at {:?}", static_dir);
            return Ok(());
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || is_hidden(path) {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.folio.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            copied += 1;
        }
        tracing::info!("Copied {} static files", copied);

        Ok(())
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
