//! Helper functions shared by the renderer, SEO and sitemap generators

mod html;
mod url;

pub use html::*;
pub use url::*;
