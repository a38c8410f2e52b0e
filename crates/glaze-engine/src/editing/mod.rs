//! Editor-side text operations.
//!
//! Everything here works on the raw markdown string with byte offsets; none
//! of it touches the renderer. The renderer's list classification matches on
//! escaped lines and rejects `+` bullets, while editing accepts them, so the
//! two deliberately keep separate patterns.

pub mod lists;

pub use lists::{ListContext, ListType, list_context, new_list_item, renumber_lists};
