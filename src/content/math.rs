//! Math typesetting markup
//!
//! Formulas are emitted as TeX wrapped in KaTeX delimiters inside marker
//! spans; the page shell runs KaTeX auto-render over `.math` elements.

use crate::helpers::html_escape;

/// Markup for `$...$`
pub fn inline(tex: &str) -> String {
    format!(
        r#"<span class="math math-inline">\({}\)</span>"#,
        html_escape(tex.trim())
    )
}

/// Markup for `$$...$$`
pub fn display(tex: &str) -> String {
    format!(
        r#"<span class="math math-display">\[{}\]</span>"#,
        html_escape(tex.trim())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline() {
        assert_eq!(
            inline("a^2+b^2=c^2"),
            r#"<span class="math math-inline">\(a^2+b^2=c^2\)</span>"#
        );
    }

    #[test]
    fn test_display_escapes_markup() {
        assert_eq!(
            display(" x < y "),
            r#"<span class="math math-display">\[x &lt; y\]</span>"#
        );
    }
}
