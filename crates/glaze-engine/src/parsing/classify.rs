//! Per-line block classification.
//!
//! Classification happens on the escaped, indentation-preserved line (so
//! blockquotes match `&gt; ` and list indentation matches `&nbsp;` runs) and
//! is re-derived fresh on every parse; nothing here persists.

use std::sync::OnceLock;

use regex::Regex;

/// What a single physical line is, checked in precedence order: first match
/// wins. A closed sum type so the assembler and post-processors can match
/// exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// 3+ of `-`, `*` or `_` alone on the line.
    Rule,
    /// Exactly three backticks plus an optional language tag.
    Fence { lang: Option<String> },
    /// 1-3 leading `#` plus a space.
    Header { level: u8, content: String },
    /// `> ` prefix.
    Blockquote { content: String },
    /// `- [ ] ` / `- [x] ` item. Classified ahead of plain bullets.
    Checkbox {
        indent: String,
        checked: bool,
        content: String,
    },
    /// `-` or `*` plus space, optionally `&nbsp;`-indented.
    Bullet {
        indent: String,
        marker: char,
        content: String,
    },
    /// Digits plus `.` plus space. `number` keeps the digits as typed.
    Numbered {
        indent: String,
        number: String,
        content: String,
    },
    /// `|`-delimited row of only `-`, `:` and whitespace.
    TableSeparator,
    /// `|...|` shaped row.
    TableRow,
    /// Anything else.
    Plain,
}

fn rule_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(-{3,}|\*{3,}|_{3,})$").expect("rule regex"))
}

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^`{3}[^`]*$").expect("fence regex"))
}

fn header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(#{1,3}) (.+)$").expect("header regex"))
}

fn blockquote_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^&gt; (.+)$").expect("blockquote regex"))
}

fn checkbox_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^((?:&nbsp;)*)- \[([ x])\] (.+)$").expect("checkbox regex"))
}

fn bullet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^((?:&nbsp;)*)([-*]) (.+)$").expect("bullet regex"))
}

fn numbered_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^((?:&nbsp;)*)(\d+)\. (.+)$").expect("numbered regex"))
}

fn table_separator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\|\s*[-:]+\s*(?:\|\s*[-:]+\s*)*\|$").expect("table separator regex")
    })
}

fn table_row_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\|.+\|$").expect("table row regex"))
}

/// Classify one escaped, indentation-preserved line.
pub fn classify(line: &str) -> LineKind {
    if rule_re().is_match(line) {
        return LineKind::Rule;
    }
    if fence_re().is_match(line) {
        let lang = line[3..].trim();
        return LineKind::Fence {
            lang: (!lang.is_empty()).then(|| lang.to_string()),
        };
    }
    if let Some(c) = header_re().captures(line) {
        return LineKind::Header {
            level: c[1].len() as u8,
            content: c[2].to_string(),
        };
    }
    if let Some(c) = blockquote_re().captures(line) {
        return LineKind::Blockquote {
            content: c[1].to_string(),
        };
    }
    if let Some(c) = checkbox_re().captures(line) {
        return LineKind::Checkbox {
            indent: c[1].to_string(),
            checked: &c[2] == "x",
            content: c[3].to_string(),
        };
    }
    if let Some(c) = bullet_re().captures(line) {
        return LineKind::Bullet {
            indent: c[1].to_string(),
            marker: c[2].chars().next().unwrap_or('-'),
            content: c[3].to_string(),
        };
    }
    if let Some(c) = numbered_re().captures(line) {
        return LineKind::Numbered {
            indent: c[1].to_string(),
            number: c[2].to_string(),
            content: c[3].to_string(),
        };
    }
    if table_separator_re().is_match(line) {
        return LineKind::TableSeparator;
    }
    if table_row_re().is_match(line) {
        return LineKind::TableRow;
    }
    LineKind::Plain
}
