//! Configuration module

mod site;

pub use site::Author;
pub use site::ChangeFreq;
pub use site::HighlightConfig;
pub use site::MarkdownConfig;
pub use site::RawHtmlPolicy;
pub use site::SiteConfig;
pub use site::SitemapConfig;
pub use site::StaticRoute;
