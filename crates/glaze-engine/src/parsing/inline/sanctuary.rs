//! Placeholder protection for code spans, images and links.
//!
//! Before emphasis runs over a line, anything whose interior must stay
//! untouched is swapped for an opaque placeholder drawn from the Unicode
//! private-use area (`U+E000 index U+E001`, characters that cannot occur in
//! ordinarily-typed text, so placeholders never collide with content). After
//! emphasis, placeholders are restored and transformed to their final HTML.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use super::code_span;
use super::emphasis;
use super::url::sanitize_url;
use crate::parsing::ParseContext;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Sanctuary {
    Code {
        delim: String,
        content: String,
    },
    Image {
        alt: String,
        url: String,
        title: Option<String>,
    },
    Link {
        text: String,
        url: String,
    },
}

/// Placeholder -> sanctuary record, in insertion order. Scoped to a single
/// line's inline pass and discarded after restoration.
#[derive(Debug, Default)]
pub(crate) struct SanctuaryMap {
    entries: Vec<(String, Sanctuary)>,
}

fn link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link regex"))
}

fn image_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"!\[([^\]]*)\]\(([^\s)]+)(?:\s+"([^"]+)")?\)"#).expect("image regex")
    })
}

fn placeholder(counter: &mut usize) -> String {
    let ph = format!("\u{E000}{}\u{E001}", *counter);
    *counter += 1;
    ph
}

/// Extract code spans, images and links into placeholders.
///
/// Link URLs are treated as protected regions first: a URL containing
/// backticks must not be misread as a code span. Code replacements are
/// applied in reverse document order so earlier spans keep valid offsets.
pub(crate) fn protect(text: &str) -> (String, SanctuaryMap) {
    let mut counter = 0usize;
    let mut map = SanctuaryMap::default();

    let url_regions: Vec<Range<usize>> = link_re()
        .captures_iter(text)
        .filter_map(|c| c.get(2).map(|m| m.range()))
        .collect();

    let mut protected = text.to_string();
    let spans = code_span::find_spans(text);
    for span in spans.iter().rev() {
        let inside_url = url_regions
            .iter()
            .any(|r| span.start >= r.start && span.end <= r.end);
        if inside_url {
            continue;
        }
        let ph = placeholder(&mut counter);
        map.entries.push((
            ph.clone(),
            Sanctuary::Code {
                delim: span.delimiter(),
                content: span.content(text).to_string(),
            },
        ));
        protected.replace_range(span.start..span.end, &ph);
    }

    // Images before links: the syntaxes overlap except for the leading bang.
    protected = image_re()
        .replace_all(&protected, |c: &regex::Captures| {
            let ph = placeholder(&mut counter);
            map.entries.push((
                ph.clone(),
                Sanctuary::Image {
                    alt: c.get(1).map(|m| m.as_str()).unwrap_or("").to_string(),
                    url: c[2].to_string(),
                    title: c.get(3).map(|m| m.as_str().to_string()),
                },
            ));
            ph
        })
        .into_owned();

    // Link text may already hold a code placeholder; that nesting is
    // intentional and resolved during restoration.
    protected = link_re()
        .replace_all(&protected, |c: &regex::Captures| {
            let ph = placeholder(&mut counter);
            map.entries.push((
                ph.clone(),
                Sanctuary::Link {
                    text: c[1].to_string(),
                    url: c[2].to_string(),
                },
            ));
            ph
        })
        .into_owned();

    (protected, map)
}

fn code_html(delim: &str, content: &str) -> String {
    // Content arrives already HTML-escaped by the line escaper; escaping it
    // again here would shift the character grid.
    format!(
        "<code><span class=\"syntax-marker\">{delim}</span>{content}<span class=\"syntax-marker\">{delim}</span></code>"
    )
}

/// Restore placeholders in first-occurrence order and emit their final HTML.
pub(crate) fn restore(html: &str, map: &SanctuaryMap, ctx: &mut ParseContext) -> String {
    let mut ordered: Vec<(usize, &String, &Sanctuary)> = map
        .entries
        .iter()
        .filter_map(|(ph, s)| html.find(ph.as_str()).map(|pos| (pos, ph, s)))
        .collect();
    ordered.sort_by_key(|(pos, _, _)| *pos);

    let mut html = html.to_string();
    for (_, ph, sanctuary) in ordered {
        let replacement = match sanctuary {
            Sanctuary::Code { delim, content } => code_html(delim, content),
            Sanctuary::Image { alt, url, title } => {
                let src = sanitize_url(url);
                let title_attr = title
                    .as_ref()
                    .map(|t| format!(" title=\"{t}\""))
                    .unwrap_or_default();
                format!("<img src=\"{src}\" alt=\"{alt}\"{title_attr} class=\"glaze-image\" />")
            }
            Sanctuary::Link { text, url } => {
                // Inner code placeholders expand first, then the remaining
                // link text gets the emphasis passes. The URL is never
                // emphasis-parsed.
                let mut text = text.clone();
                for (inner_ph, inner) in &map.entries {
                    if let Sanctuary::Code { delim, content } = inner
                        && text.contains(inner_ph.as_str())
                    {
                        text = text.replacen(inner_ph.as_str(), &code_html(delim, content), 1);
                    }
                }
                let text = emphasis::italic(&emphasis::bold(&emphasis::strikethrough(&text)));
                let anchor = ctx.next_link_anchor();
                let href = sanitize_url(url);
                format!(
                    "<a href=\"{href}\" style=\"anchor-name: {anchor}\"><span class=\"syntax-marker\">[</span>{text}<span class=\"syntax-marker url-part\">]({url})</span></a>"
                )
            }
        };
        html = html.replacen(ph.as_str(), &replacement, 1);
    }
    html
}
