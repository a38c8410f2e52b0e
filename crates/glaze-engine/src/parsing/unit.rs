//! Per-line output units.
//!
//! The assembler emits exactly one unit per physical line, in order. Units
//! carry enough structure for the tree post-processor to regroup them, and
//! every unit can render itself as a flat `<div>` wrapper for the string
//! post-processor. Concatenation uses no separators: whitespace between
//! units would itself shift the character grid.

/// One line of assembled output, tagged for post-processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineUnit {
    /// Active-line echo of the raw (escaped) source, unstyled.
    Raw { text: String },
    /// Empty source line; renders a single `&nbsp;` to keep vertical rhythm.
    Blank,
    /// A code fence delimiter line, kept visible.
    Fence {
        text: String,
        lang: Option<String>,
    },
    /// A verbatim line inside a code fence (escaped, indent-preserved).
    Code { text: String },
    /// A table row, deferred to post-processing.
    TableRow { text: String },
    /// A table separator row, deferred to post-processing.
    TableSeparator { text: String },
    /// A single list item; `inner` is the marker span plus rendered content.
    ListItem {
        indent: String,
        class: &'static str,
        inner: String,
    },
    /// Any other fully rendered line, already wrapped.
    Other { html: String },
}

impl LineUnit {
    /// Flat single-line HTML, exactly one wrapper per unit.
    pub(crate) fn flat_html(&self) -> String {
        match self {
            LineUnit::Raw { text } => {
                let content = if text.is_empty() { "&nbsp;" } else { text };
                format!("<div class=\"raw-line\">{content}</div>")
            }
            LineUnit::Blank => "<div>&nbsp;</div>".to_string(),
            LineUnit::Fence { text, .. } => {
                format!("<div><span class=\"code-fence\">{text}</span></div>")
            }
            LineUnit::Code { text } => {
                let content = if text.is_empty() { "&nbsp;" } else { text };
                format!("<div>{content}</div>")
            }
            LineUnit::TableRow { text } => format!("<div class=\"table-row\">{text}</div>"),
            LineUnit::TableSeparator { text } => {
                format!("<div class=\"table-separator\">{text}</div>")
            }
            LineUnit::ListItem {
                indent,
                class,
                inner,
            } => format!("<div>{indent}<li class=\"{class}\">{inner}</li></div>"),
            LineUnit::Other { html } => html.clone(),
        }
    }
}
