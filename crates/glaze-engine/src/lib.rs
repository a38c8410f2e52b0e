//! Markdown rendering for character-aligned live previews.
//!
//! The renderer turns markdown into styled HTML in which every source
//! character stays visible: syntax markers are wrapped, never removed, so an
//! editor can overlay the output on the input text without the two drifting
//! apart. [`parsing::strip::visible_lines`] reads the text back out;
//! [`parsing::export::clean_html`] strips the editor-only markup for export.
//!
//! The [`editing`] module is the other half of the pair: list context lookup,
//! list continuation and renumbering on the raw text, for editors that need
//! to react to Enter and indentation changes.

pub mod editing;
pub mod parsing;

// Re-export key types for easier usage
pub use editing::lists::{ListContext, ListType, list_context, new_list_item, renumber_lists};
pub use parsing::export::clean_html;
pub use parsing::strip::{plain_text, visible_lines};
pub use parsing::{ParseOptions, PostProcess, parse, parse_with_options};
