//! Sitemap generation
//!
//! Static routes come first, then one entry per active post.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::config::{ChangeFreq, SiteConfig};
use crate::content::Post;
use crate::helpers::{escape_xml, full_url_for};

/// A sitemap URL entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: NaiveDateTime,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

/// Build sitemap entries for the static routes and the given posts.
///
/// `generated_at` stands in for the modification time of static routes and
/// undated posts.
pub fn build(config: &SiteConfig, posts: &[Post], generated_at: DateTime<Utc>) -> Vec<SitemapEntry> {
    let now = generated_at.naive_utc();

    let static_routes = config.static_routes().into_iter().map(|route| SitemapEntry {
        loc: full_url_for(config, &route.path),
        lastmod: now,
        changefreq: route.changefreq,
        priority: route.priority,
    });

    let post_entries = posts.iter().filter(|post| post.active).map(|post| SitemapEntry {
        loc: full_url_for(config, &config.post_path(&post.slug)),
        lastmod: post.date.unwrap_or(now),
        changefreq: config.sitemap.post_changefreq,
        priority: config.sitemap.post_priority,
    });

    static_routes.chain(post_entries).collect()
}

/// Serialize entries as a sitemaps.org document
pub fn to_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');

    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            entry.lastmod.format("%Y-%m-%dT%H:%M:%SZ")
        ));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.changefreq.as_str()
        ));
        xml.push_str(&format!(
            "    <priority>{}</priority>\n",
            format_priority(entry.priority)
        ));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Format a priority with up to two decimals, keeping at least one
pub fn format_priority(priority: f32) -> String {
    let mut out = format!("{:.2}", priority.clamp(0.0, 1.0));
    if out.ends_with('0') {
        out.pop();
    }
    out
}

/// robots.txt pointing crawlers at the sitemap
pub fn robots_txt(config: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}\n",
        full_url_for(config, "/sitemap.xml")
    )
}
