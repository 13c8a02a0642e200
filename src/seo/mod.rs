//! SEO metadata for page heads
//!
//! Metadata is a pure function of the site configuration and the page being
//! described; nothing is read from global state.

use serde::Serialize;

use crate::config::{Author, SiteConfig};
use crate::helpers::{full_url_for, link_tag, meta_generator, meta_name, meta_property};

/// What a page says about itself
#[derive(Debug, Clone, Default)]
pub struct MetadataArgs {
    /// Site-relative path, e.g. `/blogs/`
    pub path: String,
    pub title: String,
    pub description: String,
    /// Absolute or site-relative image URL; the site cover when absent
    pub image: Option<String>,
}

impl MetadataArgs {
    pub fn new(path: &str, title: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Icons {
    pub icon: String,
    pub shortcut: String,
    pub apple: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenGraph {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub site_name: String,
    pub title: String,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwitterCard {
    pub card: String,
    pub site: String,
    pub creator: String,
    pub title: String,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppleWebApp {
    pub capable: bool,
    pub title: String,
    pub startup_image: String,
    pub status_bar_style: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormatDetection {
    pub telephone: bool,
    pub date: bool,
    pub address: bool,
    pub email: bool,
    pub url: bool,
}

/// Everything a page head needs for search engines and link previews
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub application_name: String,
    pub creator: String,
    pub authors: Vec<Author>,
    pub robots: String,
    pub keywords: Vec<String>,
    pub icons: Icons,
    pub manifest: String,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    pub apple_web_app: AppleWebApp,
    pub format_detection: FormatDetection,
}

/// Build page metadata from the site configuration
pub fn generate_metadata(config: &SiteConfig, args: &MetadataArgs) -> Metadata {
    let image = args
        .image
        .as_deref()
        .map(|image| full_url_for(config, image))
        .unwrap_or_else(|| full_url_for(config, &config.cover_image));
    let url = full_url_for(config, &args.path);

    Metadata {
        title: args.title.clone(),
        description: args.description.clone(),
        application_name: config.application_name.clone(),
        creator: config.creator.clone(),
        authors: config.authors.clone(),
        robots: config.robots.clone(),
        keywords: config.keywords.clone(),
        icons: Icons {
            icon: "/favicon.ico".to_string(),
            shortcut: "/icons/icon-512x512.png".to_string(),
            apple: "/icons/icon-512x512.png".to_string(),
        },
        manifest: full_url_for(config, "/manifest.json"),
        open_graph: OpenGraph {
            kind: "website".to_string(),
            url,
            site_name: config.application_name.clone(),
            title: args.title.clone(),
            description: args.description.clone(),
            image: image.clone(),
        },
        twitter: TwitterCard {
            card: "summary_large_image".to_string(),
            site: config.twitter.clone(),
            creator: config.twitter.clone(),
            title: args.title.clone(),
            description: args.description.clone(),
            image: image.clone(),
        },
        apple_web_app: AppleWebApp {
            capable: true,
            title: config.application_name.clone(),
            startup_image: image,
            status_bar_style: "black-translucent".to_string(),
        },
        format_detection: FormatDetection {
            telephone: true,
            date: true,
            address: true,
            email: true,
            url: true,
        },
    }
}

impl Metadata {
    /// Render as `<head>` tags, one per line
    pub fn to_html(&self) -> String {
        let mut tags = vec![format!(
            "<title>{}</title>",
            crate::helpers::html_escape(&self.title)
        )];

        tags.extend(meta_name("description", &self.description));
        tags.extend(meta_name("application-name", &self.application_name));
        for author in &self.authors {
            tags.extend(meta_name("author", &author.name));
            if let Some(url) = &author.url {
                tags.push(link_tag("author", url));
            }
        }
        tags.extend(meta_name("creator", &self.creator));
        tags.extend(meta_name("robots", &self.robots));
        tags.extend(meta_name("keywords", &self.keywords.join(",")));
        tags.push(meta_generator());

        tags.push(link_tag("icon", &self.icons.icon));
        tags.push(link_tag("shortcut icon", &self.icons.shortcut));
        tags.push(link_tag("apple-touch-icon", &self.icons.apple));
        tags.push(link_tag("manifest", &self.manifest));

        let og = &self.open_graph;
        tags.extend(meta_property("og:type", &og.kind));
        tags.extend(meta_property("og:url", &og.url));
        tags.extend(meta_property("og:site_name", &og.site_name));
        tags.extend(meta_property("og:title", &og.title));
        tags.extend(meta_property("og:description", &og.description));
        tags.extend(meta_property("og:image", &og.image));

        let tw = &self.twitter;
        tags.extend(meta_name("twitter:card", &tw.card));
        tags.extend(meta_name("twitter:site", &tw.site));
        tags.extend(meta_name("twitter:creator", &tw.creator));
        tags.extend(meta_name("twitter:title", &tw.title));
        tags.extend(meta_name("twitter:description", &tw.description));
        tags.extend(meta_name("twitter:image", &tw.image));

        let apple = &self.apple_web_app;
        if apple.capable {
            tags.extend(meta_name("mobile-web-app-capable", "yes"));
            tags.extend(meta_name("apple-mobile-web-app-capable", "yes"));
        }
        tags.extend(meta_name("apple-mobile-web-app-title", &apple.title));
        tags.extend(meta_name(
            "apple-mobile-web-app-status-bar-style",
            &apple.status_bar_style,
        ));
        tags.push(link_tag("apple-touch-startup-image", &apple.startup_image));

        tags.extend(meta_name("format-detection", &self.format_detection.to_content()));

        tags.join("\n")
    }
}

impl FormatDetection {
    fn to_content(&self) -> String {
        let flag = |name: &str, on: bool| format!("{}={}", name, if on { "yes" } else { "no" });
        [
            flag("telephone", self.telephone),
            flag("date", self.date),
            flag("address", self.address),
            flag("email", self.email),
            flag("url", self.url),
        ]
        .join(", ")
    }
}
