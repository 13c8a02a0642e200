//! Render a single post

use anyhow::{Context, Result};

use crate::Folio;

/// Render the body of `slug` to an HTML fragment
pub fn render_post(folio: &Folio, slug: &str) -> Result<String> {
    let post = folio
        .store()
        .load_post(slug)
        .with_context(|| format!("Failed to load post {:?}", slug))?;
    let html = folio
        .renderer()
        .render(&post.body)
        .with_context(|| format!("Failed to render post {:?}", post.slug))?;
    tracing::debug!("Rendered {} ({} bytes)", post.slug, html.len());
    Ok(html)
}

/// Run the render command
pub fn run(folio: &Folio, slug: &str) -> Result<()> {
    print!("{}", render_post(folio, slug)?);
    Ok(())
}
