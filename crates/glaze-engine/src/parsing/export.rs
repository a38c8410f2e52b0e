//! Clean-HTML export.
//!
//! The live preview keeps every source character visible, so its HTML is
//! full of marker spans and editor-only classes. Export strips those down
//! to plain semantic HTML.

use std::sync::OnceLock;

use regex::Regex;

fn marker_span_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<span class="syntax-marker[^"]*">.*?</span>"#).expect("marker span regex")
    })
}

fn editor_class_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#" class="(?:bullet-list|ordered-list|code-fence|hr-marker|blockquote|url-part)""#)
            .expect("editor class regex")
    })
}

fn empty_class_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#" class="""#).expect("empty class regex"))
}

/// Strip editor-only markup from rendered HTML, leaving plain semantic HTML
/// suitable for storage or handing to another renderer.
///
/// Marker spans vanish with their contents (they hold only the markdown
/// delimiters), then the editor-only class attributes drop off.
pub fn clean_html(html: &str) -> String {
    let html = marker_span_re().replace_all(html, "");
    let html = editor_class_re().replace_all(&html, "");
    empty_class_re().replace_all(&html, "").into_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parsing::parse;

    #[test]
    fn header_loses_its_marker() {
        assert_eq!(clean_html(&parse("# Title")), "<div><h1>Title</h1></div>");
    }

    #[test]
    fn list_items_lose_marker_and_class() {
        assert_eq!(
            clean_html(&parse("- a\n- b")),
            "<ul><li>a</li><li>b</li></ul>"
        );
    }

    #[test]
    fn links_keep_text_but_lose_url_echo() {
        let cleaned = clean_html(&parse("[text](https://a.io)"));
        assert!(cleaned.contains(">text</a>"));
        assert!(!cleaned.contains("]("));
        assert!(!cleaned.contains("url-part"));
    }

    #[test]
    fn fence_delimiters_lose_their_class() {
        let cleaned = clean_html(&parse("```\nx\n```"));
        assert!(!cleaned.contains("code-fence"));
        assert!(cleaned.contains("<pre class=\"code-block\">"));
    }

    #[test]
    fn bold_keeps_tag_without_delimiters() {
        assert_eq!(clean_html(&parse("**b**")), "<div><strong>b</strong></div>");
    }
}
