//! List-aware editing support.
//!
//! Works on the raw markdown text with byte offsets, independent of the
//! renderer. Editors use [`list_context`] to find out what list item the
//! caret sits in, [`new_list_item`] to continue it on Enter, and
//! [`renumber_lists`] to repair numbered sequences after edits.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The kind of list item the caret line is, with its marker payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListType {
    Bullet { marker: char },
    Numbered { number: u64 },
    Checkbox { checked: bool },
}

/// What surrounds the caret, resolved to one line of the document.
///
/// All positions are byte offsets into the original text. `marker_end` is
/// where the item's content starts (just past the marker and its trailing
/// spaces); for a non-list line it equals `line_start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListContext {
    pub list_type: Option<ListType>,
    pub indent: String,
    pub content: String,
    pub line_start: usize,
    pub line_end: usize,
    pub marker_end: usize,
}

fn bullet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\s*)([-*+])\s+(.*)$").expect("bullet pattern"))
}

fn numbered_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\s*)(\d+)\.\s+(.*)$").expect("numbered pattern"))
}

fn checkbox_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\s*)-\s+\[([ x])\]\s+(.*)$").expect("checkbox pattern"))
}

/// Resolve the list context of the line containing `cursor`.
///
/// A cursor sitting exactly on a line's trailing newline still belongs to
/// that line. A cursor past the end of the text resolves to an empty
/// non-list context at the end of the text.
pub fn list_context(text: &str, cursor: usize) -> ListContext {
    let mut line_start = 0;
    for line in text.split('\n') {
        if line_start + line.len() >= cursor {
            return context_of(line, line_start);
        }
        line_start += line.len() + 1;
    }
    ListContext {
        list_type: None,
        indent: String::new(),
        content: String::new(),
        line_start: text.len(),
        line_end: text.len(),
        marker_end: text.len(),
    }
}

/// Classify one line. Checkbox wins over bullet, bullet over numbered.
fn context_of(line: &str, line_start: usize) -> ListContext {
    let line_end = line_start + line.len();

    if let Some(c) = checkbox_re().captures(line) {
        return ListContext {
            list_type: Some(ListType::Checkbox {
                checked: &c[2] == "x",
            }),
            indent: c[1].to_string(),
            content: c[3].to_string(),
            line_start,
            line_end,
            marker_end: line_start + capture_start(&c, 3),
        };
    }
    if let Some(c) = bullet_re().captures(line) {
        return ListContext {
            list_type: Some(ListType::Bullet {
                marker: c[2].chars().next().unwrap_or('-'),
            }),
            indent: c[1].to_string(),
            content: c[3].to_string(),
            line_start,
            line_end,
            marker_end: line_start + capture_start(&c, 3),
        };
    }
    if let Some(c) = numbered_re().captures(line) {
        return ListContext {
            list_type: Some(ListType::Numbered {
                number: c[2].parse().unwrap_or(u64::MAX),
            }),
            indent: c[1].to_string(),
            content: c[3].to_string(),
            line_start,
            line_end,
            marker_end: line_start + capture_start(&c, 3),
        };
    }

    ListContext {
        list_type: None,
        indent: String::new(),
        content: line.to_string(),
        line_start,
        line_end,
        marker_end: line_start,
    }
}

fn capture_start(captures: &regex::Captures<'_>, index: usize) -> usize {
    captures.get(index).map(|m| m.start()).unwrap_or(0)
}

/// The prefix an editor inserts to continue the list on a new line.
///
/// Bullets echo their marker, numbered items count up, checkboxes continue
/// unchecked. Returns an empty string outside a list.
pub fn new_list_item(context: &ListContext) -> String {
    match context.list_type {
        Some(ListType::Bullet { marker }) => format!("{}{} ", context.indent, marker),
        Some(ListType::Numbered { number }) => {
            format!("{}{}. ", context.indent, number.saturating_add(1))
        }
        Some(ListType::Checkbox { .. }) => format!("{}- [ ] ", context.indent),
        None => String::new(),
    }
}

/// Rewrite every numbered-list run so each indent level counts 1, 2, 3...
///
/// Counters are keyed by indent width. A numbered item resets all counters
/// deeper than its own level. Blank lines and lines starting in column zero
/// end the current list; indented non-list lines (wrapped continuations) do
/// not.
pub fn renumber_lists(text: &str) -> String {
    let mut counters: std::collections::BTreeMap<usize, u64> = std::collections::BTreeMap::new();

    let lines: Vec<String> = text
        .split('\n')
        .map(|line| {
            if let Some(c) = numbered_re().captures(line) {
                let indent = &c[1];
                let level = indent.len();
                let number = counters.get(&level).copied().unwrap_or(0) + 1;
                counters.insert(level, number);
                counters.split_off(&(level + 1));
                format!("{indent}{number}. {}", &c[3])
            } else {
                if line.trim().is_empty() || !line.starts_with(char::is_whitespace) {
                    counters.clear();
                }
                line.to_string()
            }
        })
        .collect();

    lines.join("\n")
}
