//! Structural post-processing: regroup per-line fragments into real blocks.
//!
//! Grouping rules (shared by both backends):
//! - Consecutive single-item list units merge into a fresh `<ul>`/`<ol>`; a
//!   new list starts whenever the marker type changes or any other unit
//!   intervenes. Indentation placeholders move inside the `<li>`.
//! - A run of table rows promotes to `<table>` only when the run contains a
//!   separator line; rows before the first separator become `<thead>`, the
//!   rest `<tbody>`. Runs without a separator stay literal row divs.
//! - A fence delimiter opens a `<pre class="code-block"><code>` sibling that
//!   collects the decoded text of the fenced lines, newline-joined, until the
//!   matching fence. Both delimiter lines stay visible. An unterminated
//!   fence collects through end of input.

pub(crate) mod text;
pub(crate) mod tree;

use crate::parsing::inline::render_inline;
use crate::parsing::{ParseContext, unit::LineUnit};

/// One interface over the two grouping backends.
pub(crate) trait PostProcessor {
    fn post_process(&self, units: &[LineUnit], ctx: &mut ParseContext) -> String;
}

/// A buffered table line: separator or row text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TableLine {
    Separator,
    Row(String),
}

/// Split table row interior on pipes, honoring `\|` escapes.
fn split_cells(inner: &str) -> Vec<&str> {
    let bytes = inner.as_bytes();
    let mut cells = Vec::new();
    let mut start = 0;
    for i in 0..bytes.len() {
        if bytes[i] == b'|' && (i == 0 || bytes[i - 1] != b'\\') {
            cells.push(&inner[start..i]);
            start = i + 1;
        }
    }
    cells.push(&inner[start..]);
    cells
}

/// Render one `|...|` row into `<tr>` with `tag` cells. Cell contents get the
/// full inline treatment; empty cells render a placeholder space.
fn render_row(text: &str, tag: &str, ctx: &mut ParseContext) -> String {
    let inner = &text[1..text.len() - 1];
    let mut tr = String::from("<tr>");
    for cell in split_cells(inner) {
        let trimmed = cell.trim();
        let content = if trimmed.is_empty() {
            "&nbsp;".to_string()
        } else {
            render_inline(trimmed, ctx)
        };
        tr.push_str(&format!("<{tag}>{content}</{tag}>"));
    }
    tr.push_str("</tr>");
    tr
}

/// Promote a buffered run of table lines, or decline.
///
/// Returns `None` when the run has no separator; such runs are never
/// promoted and must stay literal. Rows before the first separator become
/// header cells, rows after become body cells; extra separators are dropped.
pub(crate) fn render_table(lines: &[TableLine], ctx: &mut ParseContext) -> Option<String> {
    if !lines.iter().any(|l| matches!(l, TableLine::Separator)) {
        return None;
    }
    let mut head = String::new();
    let mut body = String::new();
    let mut seen_separator = false;
    for line in lines {
        match line {
            TableLine::Separator => seen_separator = true,
            TableLine::Row(text) => {
                if seen_separator {
                    body.push_str(&render_row(text, "td", ctx));
                } else {
                    head.push_str(&render_row(text, "th", ctx));
                }
            }
        }
    }
    let mut table = String::from("<table class=\"glaze-table\">");
    if !head.is_empty() {
        table.push_str(&format!("<thead>{head}</thead>"));
    }
    if !body.is_empty() {
        table.push_str(&format!("<tbody>{body}</tbody>"));
    }
    table.push_str("</table>");
    Some(table)
}

/// Decode one line of fenced code from its flat HTML content to plain text,
/// the way a DOM `textContent` read would: placeholder spaces back to real
/// spaces, entities decoded.
pub(crate) fn decode_code_line(content: &str) -> String {
    let spaced = content.replace("&nbsp;", " ");
    html_escape::decode_html_entities(&spaced).into_owned()
}

/// The `<pre><code>` block for a finished (or unterminated) fence.
pub(crate) fn render_code_block(lang: Option<&str>, lines: &[String]) -> String {
    let class = lang
        .map(|l| format!(" class=\"language-{l}\""))
        .unwrap_or_default();
    let code = crate::parsing::escape::escape_html(&lines.join("\n"));
    format!("<pre class=\"code-block\"><code{class}>{code}</code></pre>")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn cells_split_on_unescaped_pipes_only() {
        assert_eq!(split_cells(" a \\| b | c "), vec![" a \\| b ", " c "]);
    }

    #[test]
    fn rows_without_separator_are_not_promoted() {
        let lines = vec![
            TableLine::Row("| a |".to_string()),
            TableLine::Row("| b |".to_string()),
        ];
        let mut ctx = ParseContext::new();
        assert_eq!(render_table(&lines, &mut ctx), None);
    }

    #[test]
    fn rows_split_around_first_separator() {
        let lines = vec![
            TableLine::Row("| h |".to_string()),
            TableLine::Separator,
            TableLine::Row("| b |".to_string()),
        ];
        let mut ctx = ParseContext::new();
        let table = render_table(&lines, &mut ctx).unwrap();
        assert_eq!(
            table,
            "<table class=\"glaze-table\"><thead><tr><th>h</th></tr></thead><tbody><tr><td>b</td></tr></tbody></table>"
        );
    }

    #[test]
    fn separator_first_run_has_no_header() {
        let lines = vec![
            TableLine::Separator,
            TableLine::Row("| b |".to_string()),
        ];
        let mut ctx = ParseContext::new();
        let table = render_table(&lines, &mut ctx).unwrap();
        assert!(!table.contains("<thead>"));
        assert!(table.contains("<tbody>"));
    }

    #[test]
    fn empty_cells_render_placeholder() {
        let mut ctx = ParseContext::new();
        let tr = render_row("|  | x |", "td", &mut ctx);
        assert_eq!(tr, "<tr><td>&nbsp;</td><td>x</td></tr>");
    }

    #[test]
    fn code_lines_decode_entities_and_nbsp() {
        assert_eq!(decode_code_line("&nbsp;&nbsp;a &lt;b&gt;"), "  a <b>");
    }

    #[test]
    fn code_block_carries_language_class() {
        let html = render_code_block(Some("rust"), &[String::from("fn main() {}")]);
        assert!(html.contains("<code class=\"language-rust\">"));
        assert!(html.contains("fn main() {}"));
    }
}
