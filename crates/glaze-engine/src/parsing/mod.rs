//! The rendering pipeline: escape, classify, render, assemble, post-process.
//!
//! Data flows one way. Raw text is split on line feeds; each line is escaped,
//! indentation-preserved, classified and rendered into exactly one
//! [`unit::LineUnit`]; the post-processor then regroups consecutive
//! list/table/code fragments into proper `<ul>`/`<ol>`/`<table>`/`<pre>`
//! structures. The caller owns the raw text; nothing here is retained
//! between calls.

pub mod classify;
pub mod escape;
pub mod export;
pub mod inline;
pub mod postprocess;
pub mod strip;
pub(crate) mod unit;

use serde::{Deserialize, Serialize};

use classify::{LineKind, classify};
use escape::{escape_html, preserve_indentation};
use inline::render_inline;
use postprocess::PostProcessor;
use unit::LineUnit;

/// Which structural post-processor backend to run.
///
/// Both produce equivalent groupings; [`PostProcess::Tree`] builds an owned
/// node tree, [`PostProcess::Text`] rewrites the concatenated HTML string and
/// exists for contexts where holding a tree is undesirable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PostProcess {
    #[default]
    Tree,
    Text,
}

/// Options for a single parse call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Line index (0-based) the caret is on, if any.
    pub active_line: Option<usize>,
    /// Echo the active line as raw, unstyled source text.
    pub show_active_line_raw: bool,
    /// Post-processor backend selection.
    pub post_process: PostProcess,
}

/// Per-call parse state.
///
/// Holds the link-anchor counter so anchor names are unique within one parse
/// and always restart at zero on the next. The counter is never shared
/// across calls, so concurrent editor instances cannot perturb each other's
/// numbering.
#[derive(Debug)]
pub(crate) struct ParseContext {
    link_index: usize,
}

impl ParseContext {
    pub(crate) fn new() -> Self {
        Self { link_index: 0 }
    }

    /// Next unique CSS anchor name for a rendered link.
    pub(crate) fn next_link_anchor(&mut self) -> String {
        let anchor = format!("--link-{}", self.link_index);
        self.link_index += 1;
        anchor
    }
}

/// Parse a whole markdown document to character-aligned HTML with default
/// options.
pub fn parse(text: &str) -> String {
    parse_with_options(text, &ParseOptions::default())
}

/// Parse a whole markdown document to character-aligned HTML.
///
/// Stripping all tags and `syntax-marker` spans from the result and mapping
/// `&nbsp;` placeholders back to spaces reproduces the input text line for
/// line (blank lines come back as a single space). Malformed markdown never
/// errors; it degrades to literal text.
pub fn parse_with_options(text: &str, options: &ParseOptions) -> String {
    let mut ctx = ParseContext::new();
    let units = assemble(text, options, &mut ctx);
    match options.post_process {
        PostProcess::Tree => postprocess::tree::TreePostProcessor.post_process(&units, &mut ctx),
        PostProcess::Text => postprocess::text::TextPostProcessor.post_process(&units, &mut ctx),
    }
}

/// Walk all lines and emit one unit per line, tracking only the fence state.
fn assemble(text: &str, options: &ParseOptions, ctx: &mut ParseContext) -> Vec<LineUnit> {
    let mut units = Vec::new();
    let mut in_fence = false;

    for (index, line) in text.split('\n').enumerate() {
        if options.show_active_line_raw && options.active_line == Some(index) {
            // Raw echo short-circuits everything, fence tracking included.
            units.push(LineUnit::Raw {
                text: escape_html(line),
            });
            continue;
        }

        let escaped = escape_html(line);
        let indented = preserve_indentation(&escaped, line);
        let kind = classify(&indented);

        if let LineKind::Fence { lang } = kind {
            in_fence = !in_fence;
            units.push(LineUnit::Fence {
                text: indented,
                lang,
            });
            continue;
        }
        if in_fence {
            // Fence contents are never markdown-parsed.
            units.push(LineUnit::Code { text: indented });
            continue;
        }

        units.push(render_line(kind, indented, ctx));
    }

    units
}

/// Render one classified line into its unit.
fn render_line(kind: LineKind, indented: String, ctx: &mut ParseContext) -> LineUnit {
    match kind {
        LineKind::Rule => LineUnit::Other {
            html: format!("<div><span class=\"hr-marker\">{indented}</span></div>"),
        },
        LineKind::Header { level, content } => {
            let hashes = "#".repeat(level as usize);
            let content = render_inline(&content, ctx);
            LineUnit::Other {
                html: format!(
                    "<div><h{level}><span class=\"syntax-marker\">{hashes} </span>{content}</h{level}></div>"
                ),
            }
        }
        LineKind::Blockquote { content } => {
            let content = render_inline(&content, ctx);
            LineUnit::Other {
                html: format!(
                    "<div><span class=\"blockquote\"><span class=\"syntax-marker\">&gt;</span> {content}</span></div>"
                ),
            }
        }
        LineKind::Checkbox {
            indent,
            checked,
            content,
        } => {
            let mark = if checked { "x" } else { " " };
            let content = render_inline(&content, ctx);
            LineUnit::ListItem {
                indent,
                class: "bullet-list",
                inner: format!(
                    "<span class=\"syntax-marker\">- </span><span class=\"checkbox\">[{mark}]</span> {content}"
                ),
            }
        }
        LineKind::Bullet {
            indent,
            marker,
            content,
        } => {
            let content = render_inline(&content, ctx);
            LineUnit::ListItem {
                indent,
                class: "bullet-list",
                inner: format!("<span class=\"syntax-marker\">{marker} </span>{content}"),
            }
        }
        LineKind::Numbered {
            indent,
            number,
            content,
        } => {
            let content = render_inline(&content, ctx);
            LineUnit::ListItem {
                indent,
                class: "ordered-list",
                inner: format!("<span class=\"syntax-marker\">{number}. </span>{content}"),
            }
        }
        LineKind::TableRow => LineUnit::TableRow { text: indented },
        LineKind::TableSeparator => LineUnit::TableSeparator { text: indented },
        // Fences are toggled by the assembler before this point.
        LineKind::Fence { lang } => LineUnit::Fence {
            text: indented,
            lang,
        },
        LineKind::Plain => {
            if indented.is_empty() {
                LineUnit::Blank
            } else {
                let html = render_inline(&indented, ctx);
                LineUnit::Other {
                    html: format!("<div>{html}</div>"),
                }
            }
        }
    }
}
