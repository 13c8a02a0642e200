//! HTML helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape XML special characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Generate a `<meta name=...>` tag, skipped when the content is empty
pub fn meta_name(name: &str, content: &str) -> Option<String> {
    (!content.is_empty()).then(|| {
        format!(
            r#"<meta name="{}" content="{}">"#,
            name,
            html_escape(content)
        )
    })
}

/// Generate a `<meta property=...>` tag, skipped when the content is empty
pub fn meta_property(property: &str, content: &str) -> Option<String> {
    (!content.is_empty()).then(|| {
        format!(
            r#"<meta property="{}" content="{}">"#,
            property,
            html_escape(content)
        )
    })
}

/// Generate a `<link>` tag
pub fn link_tag(rel: &str, href: &str) -> String {
    format!(r#"<link rel="{}" href="{}">"#, rel, html_escape(href))
}

/// Generate meta generator tag
pub fn meta_generator() -> String {
    format!(
        r#"<meta name="generator" content="folio-rs {}">"#,
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a&b<'c'>"), "a&amp;b&lt;&apos;c&apos;&gt;");
    }

    #[test]
    fn test_meta_tags() {
        assert_eq!(
            meta_name("description", "Fish & chips").as_deref(),
            Some(r#"<meta name="description" content="Fish &amp; chips">"#)
        );
        assert!(meta_property("og:title", "").is_none());
        assert_eq!(
            link_tag("icon", "/favicon.ico"),
            r#"<link rel="icon" href="/favicon.ico">"#
        );
    }
}
