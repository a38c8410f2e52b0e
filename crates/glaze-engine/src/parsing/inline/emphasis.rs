//! Strikethrough, bold and italic rendering.
//!
//! Every emphasis wraps its content in a semantic tag plus two visible
//! `syntax-marker` spans carrying the literal delimiters, so the rendered
//! line keeps the same character grid as the source.
//!
//! Order matters and is fixed by [`super::render_inline`]: strikethrough
//! before bold before italic. Bold's two-character delimiters must not be
//! read as two adjacent italic delimiters, and single tildes must not match
//! inside a `~~` run. Bold needs no look-around and uses `regex`; the other
//! rules need look-around and are hand scanners.

use std::sync::OnceLock;

use regex::Regex;

fn wrap(tag: &str, delim: &str, content: &str) -> String {
    format!(
        "<{tag}><span class=\"syntax-marker\">{delim}</span>{content}<span class=\"syntax-marker\">{delim}</span></{tag}>"
    )
}

fn char_before(s: &str, i: usize) -> Option<char> {
    s[..i].chars().next_back()
}

fn char_at(s: &str, i: usize) -> Option<char> {
    s.get(i..).and_then(|t| t.chars().next())
}

/// Replace lazily-delimited spans of `delim`, walking left to right.
///
/// `opener_ok`/`closer_ok` receive the byte offset of the delimiter and act
/// as look-around assertions. The earliest valid closer after at least one
/// content character wins, matching lazy `(.+?)` semantics.
fn replace_spans(
    s: &str,
    delim: &str,
    tag: &str,
    opener_ok: impl Fn(&str, usize) -> bool,
    closer_ok: impl Fn(&str, usize) -> bool,
) -> String {
    let d = delim.len();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < s.len() {
        if s[i..].starts_with(delim) && opener_ok(s, i) {
            let mut found = None;
            let content_start = i + d;
            for (off, _) in s[content_start..].char_indices() {
                let j = content_start + off;
                if j == content_start {
                    continue; // content must be non-empty
                }
                if s[j..].starts_with(delim) && closer_ok(s, j) {
                    found = Some(j);
                    break;
                }
            }
            if let Some(j) = found {
                out.push_str(&wrap(tag, delim, &s[content_start..j]));
                i = j + d;
                continue;
            }
        }
        let c = s[i..].chars().next().unwrap_or_default();
        out.push(c);
        i += c.len_utf8();
    }
    out
}

fn bold_star_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold star regex"))
}

fn bold_underscore_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"__(.+?)__").expect("bold underscore regex"))
}

/// `~~text~~` and `~text~`, both rejecting delimiters that touch more tildes.
pub fn strikethrough(s: &str) -> String {
    let not_tilde = |c: Option<char>| c != Some('~');
    let s = replace_spans(
        s,
        "~~",
        "del",
        |s, i| not_tilde(char_before(s, i)) && not_tilde(char_at(s, i + 2)),
        |s, j| not_tilde(char_before(s, j)) && not_tilde(char_at(s, j + 2)),
    );
    replace_spans(
        &s,
        "~",
        "del",
        |s, i| not_tilde(char_before(s, i)) && not_tilde(char_at(s, i + 1)),
        |s, j| not_tilde(char_before(s, j)) && not_tilde(char_at(s, j + 1)),
    )
}

/// `**text**` and `__text__` with lazy content.
pub fn bold(s: &str) -> String {
    let s = bold_star_re().replace_all(s, |c: &regex::Captures| wrap("strong", "**", &c[1]));
    bold_underscore_re()
        .replace_all(&s, |c: &regex::Captures| wrap("strong", "__", &c[1]))
        .into_owned()
}

/// `*text*` not adjacent to other asterisks, and `_text_` only at word
/// boundaries so `snake_case_words` stays plain.
pub fn italic(s: &str) -> String {
    let not_star = |c: Option<char>| c != Some('*');
    let s = replace_spans(
        s,
        "*",
        "em",
        |s, i| not_star(char_before(s, i)) && not_star(char_at(s, i + 1)),
        |s, j| not_star(char_before(s, j)) && not_star(char_at(s, j + 1)),
    );
    let boundary = |c: Option<char>| c.is_none_or(|c| c.is_whitespace());
    replace_spans(
        &s,
        "_",
        "em",
        |s, i| boundary(char_before(s, i)) && char_at(s, i + 1) != Some('_'),
        |s, j| char_before(s, j) != Some('_') && boundary(char_at(s, j + 1)),
    )
}
