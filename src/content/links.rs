//! Link classification and rewriting

use crate::helpers::html_escape;

/// Where a hyperlink points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Absolute path on this site, navigated client-side
    Internal,
    /// Jump within the current document
    Anchor,
    /// Anything else, opened in a new browsing context
    External,
}

impl LinkKind {
    pub fn classify(href: &str) -> Self {
        if href.starts_with("//") {
            // protocol-relative, leaves the site
            LinkKind::External
        } else if href.starts_with('/') {
            LinkKind::Internal
        } else if href.starts_with('#') {
            LinkKind::Anchor
        } else {
            LinkKind::External
        }
    }
}

/// Render the opening `<a>` tag for a link of the given destination
pub fn open_tag(href: &str, title: &str, class: &str) -> String {
    let mut tag = format!(r#"<a href="{}""#, html_escape(href));

    if !class.is_empty() {
        tag.push_str(&format!(r#" class="{}""#, html_escape(class)));
    }
    if !title.is_empty() {
        tag.push_str(&format!(r#" title="{}""#, html_escape(title)));
    }

    match LinkKind::classify(href) {
        LinkKind::Internal => tag.push_str(r#" data-link="internal""#),
        LinkKind::Anchor => {}
        LinkKind::External => tag.push_str(r#" target="_blank" rel="noopener noreferrer""#),
    }

    tag.push('>');
    tag
}
