//! String-rewriting grouping backend.
//!
//! Concatenates the flat per-line divs first, then rewrites the string in
//! three passes: fenced code, lists, tables. Produces byte-identical output
//! to the tree backend for equal input.

use std::sync::OnceLock;

use regex::Regex;

use super::{PostProcessor, TableLine, decode_code_line, render_code_block, render_table};
use crate::parsing::{ParseContext, unit::LineUnit};

const FENCE_OPEN: &str = "<div><span class=\"code-fence\">";
const FENCE_CLOSE: &str = "</span></div>";

fn div_content_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<div[^>]*>(.*?)</div>").expect("div content regex"))
}

fn bullet_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?:<div>(?:&nbsp;)*<li class="bullet-list">.*?</li></div>)+"#)
            .expect("bullet run regex")
    })
}

fn bullet_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<div>((?:&nbsp;)*)<li class="bullet-list">(.*?)</li></div>"#)
            .expect("bullet item regex")
    })
}

fn numbered_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?:<div>(?:&nbsp;)*<li class="ordered-list">.*?</li></div>)+"#)
            .expect("numbered run regex")
    })
}

fn numbered_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<div>((?:&nbsp;)*)<li class="ordered-list">(.*?)</li></div>"#)
            .expect("numbered item regex")
    })
}

fn table_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?:<div class="table-(?:row|separator)">.*?</div>)+"#)
            .expect("table run regex")
    })
}

fn table_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<div class="table-(row|separator)">(.*?)</div>"#)
            .expect("table item regex")
    })
}

pub(crate) struct TextPostProcessor;

impl PostProcessor for TextPostProcessor {
    fn post_process(&self, units: &[LineUnit], ctx: &mut ParseContext) -> String {
        let flat: String = units.iter().map(LineUnit::flat_html).collect();
        let html = group_code(&flat);
        let html = group_lists(&html);
        group_tables(&html, ctx)
    }
}

/// Rewrite each pair of fence divs, collapsing the divs between them into a
/// `<pre><code>` block. An opening fence with no closing fence collects to
/// the end of the string.
fn group_code(flat: &str) -> String {
    let mut out = String::with_capacity(flat.len());
    let mut pos = 0;

    while let Some(rel) = flat[pos..].find(FENCE_OPEN) {
        let open_start = pos + rel;
        let text_start = open_start + FENCE_OPEN.len();
        let Some(rel_end) = flat[text_start..].find(FENCE_CLOSE) else {
            break;
        };
        let fence_text = &flat[text_start..text_start + rel_end];
        let after_open = text_start + rel_end + FENCE_CLOSE.len();

        // Keep everything up to and including the opening fence line.
        out.push_str(&flat[pos..after_open]);
        pos = after_open;

        let lang = fence_text[3..].trim();
        let lang = (!lang.is_empty()).then_some(lang);

        let (content, close_start) = match flat[pos..].find(FENCE_OPEN) {
            Some(rel_close) => (&flat[pos..pos + rel_close], Some(pos + rel_close)),
            None => (&flat[pos..], None),
        };

        let lines: Vec<String> = div_content_re()
            .captures_iter(content)
            .map(|c| decode_code_line(&c[1]))
            .collect();
        out.push_str(&render_code_block(lang, &lines));

        match close_start {
            Some(close_start) => {
                let close_text_start = close_start + FENCE_OPEN.len();
                let Some(rel_close_end) = flat[close_text_start..].find(FENCE_CLOSE) else {
                    break;
                };
                let after_close = close_text_start + rel_close_end + FENCE_CLOSE.len();
                out.push_str(&flat[close_start..after_close]);
                pos = after_close;
            }
            None => {
                pos = flat.len();
            }
        }
    }

    out.push_str(&flat[pos..]);
    out
}

/// Wrap each run of same-kind list-item divs into one list element, lifting
/// the indentation placeholders inside the items.
fn group_lists(html: &str) -> String {
    let wrapped = bullet_run_re().replace_all(html, |run: &regex::Captures<'_>| {
        let mut list = String::from("<ul>");
        for item in bullet_item_re().captures_iter(&run[0]) {
            list.push_str(&format!(
                "<li class=\"bullet-list\">{}{}</li>",
                &item[1], &item[2]
            ));
        }
        list.push_str("</ul>");
        list
    });
    numbered_run_re()
        .replace_all(&wrapped, |run: &regex::Captures<'_>| {
            let mut list = String::from("<ol>");
            for item in numbered_item_re().captures_iter(&run[0]) {
                list.push_str(&format!(
                    "<li class=\"ordered-list\">{}{}</li>",
                    &item[1], &item[2]
                ));
            }
            list.push_str("</ol>");
            list
        })
        .into_owned()
}

/// Promote each run of table-row divs that contains a separator; runs
/// without one are left exactly as matched.
fn group_tables(html: &str, ctx: &mut ParseContext) -> String {
    table_run_re()
        .replace_all(html, |run: &regex::Captures<'_>| {
            let lines: Vec<TableLine> = table_item_re()
                .captures_iter(&run[0])
                .map(|c| {
                    if &c[1] == "separator" {
                        TableLine::Separator
                    } else {
                        TableLine::Row(c[2].to_string())
                    }
                })
                .collect();
            match render_table(&lines, ctx) {
                Some(table) => table,
                None => run[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parsing::postprocess::tree::TreePostProcessor;
    use crate::parsing::{ParseOptions, parse_with_options};

    fn text_parse(input: &str) -> String {
        let options = ParseOptions {
            post_process: crate::parsing::PostProcess::Text,
            ..ParseOptions::default()
        };
        parse_with_options(input, &options)
    }

    fn run_both(units: &[LineUnit]) -> (String, String) {
        let mut tree_ctx = ParseContext::new();
        let mut text_ctx = ParseContext::new();
        (
            TreePostProcessor.post_process(units, &mut tree_ctx),
            TextPostProcessor.post_process(units, &mut text_ctx),
        )
    }

    #[test]
    fn bullet_runs_group_into_one_ul() {
        let html = text_parse("- a\n- b");
        assert_eq!(
            html,
            "<ul><li class=\"bullet-list\"><span class=\"syntax-marker\">- </span>a</li>\
             <li class=\"bullet-list\"><span class=\"syntax-marker\">- </span>b</li></ul>"
        );
    }

    #[test]
    fn blank_line_splits_bullet_runs() {
        let html = text_parse("- a\n\n- b");
        assert_eq!(html.matches("<ul>").count(), 2);
        assert!(html.contains("<div>&nbsp;</div>"));
    }

    #[test]
    fn ordered_and_bullet_runs_stay_separate() {
        let html = text_parse("- a\n1. b");
        assert!(html.contains("</ul><ol>"));
    }

    #[test]
    fn fenced_lines_collapse_into_pre() {
        let html = text_parse("```rust\nlet x = 1;\n```");
        assert_eq!(
            html,
            "<div><span class=\"code-fence\">```rust</span></div>\
             <pre class=\"code-block\"><code class=\"language-rust\">let x = 1;</code></pre>\
             <div><span class=\"code-fence\">```</span></div>"
        );
    }

    #[test]
    fn unterminated_fence_collects_to_end() {
        let html = text_parse("```\ntail\nstill code");
        assert!(html.contains("<pre class=\"code-block\"><code>tail\nstill code</code></pre>"));
        assert_eq!(html.matches("code-fence").count(), 1);
    }

    #[test]
    fn code_entities_decode_then_re_escape() {
        let html = text_parse("```\na < b\n```");
        assert!(html.contains("<code>a &lt; b</code>"));
    }

    #[test]
    fn table_with_separator_promotes() {
        let html = text_parse("| h |\n| - |\n| b |");
        assert_eq!(
            html,
            "<table class=\"glaze-table\"><thead><tr><th>h</th></tr></thead>\
             <tbody><tr><td>b</td></tr></tbody></table>"
        );
    }

    #[test]
    fn table_without_separator_stays_literal() {
        let html = text_parse("| a |\n| b |");
        assert_eq!(
            html,
            "<div class=\"table-row\">| a |</div><div class=\"table-row\">| b |</div>"
        );
    }

    #[test]
    fn backends_agree_on_mixed_units() {
        let units = [
            LineUnit::Other {
                html: "<div>intro</div>".to_string(),
            },
            LineUnit::ListItem {
                indent: "&nbsp;&nbsp;".to_string(),
                class: "bullet-list",
                inner: "<span class=\"syntax-marker\">- </span>x".to_string(),
            },
            LineUnit::Blank,
            LineUnit::TableRow {
                text: "| h |".to_string(),
            },
            LineUnit::TableSeparator {
                text: "| - |".to_string(),
            },
            LineUnit::TableRow {
                text: "| b |".to_string(),
            },
            LineUnit::Fence {
                text: "```".to_string(),
                lang: None,
            },
            LineUnit::Code {
                text: "&nbsp;&nbsp;x".to_string(),
            },
        ];
        let (tree, text) = run_both(&units);
        assert_eq!(tree, text);
    }
}
