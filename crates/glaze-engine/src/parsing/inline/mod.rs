//! Inline rendering: protect sanctuaries, apply emphasis, restore.

pub(crate) mod code_span;
pub(crate) mod emphasis;
pub(crate) mod sanctuary;
pub mod url;

use crate::parsing::ParseContext;

/// Render the inline rules over one piece of (already escaped) line content.
///
/// Code spans, images and links are lifted out first so the emphasis passes
/// cannot corrupt their interiors, then restored and transformed.
pub(crate) fn render_inline(text: &str, ctx: &mut ParseContext) -> String {
    let (protected, map) = sanctuary::protect(text);
    let html = emphasis::strikethrough(&protected);
    let html = emphasis::bold(&html);
    let html = emphasis::italic(&html);
    sanctuary::restore(&html, &map, ctx)
}
