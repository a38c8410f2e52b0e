//! HTML escaping and indentation preservation.
//!
//! The overlay renders on top of a plain textarea, so every escaped line must
//! keep the exact character count and column positions of its source. Leading
//! spaces are re-emitted as `&nbsp;` placeholders because markup would
//! otherwise collapse them.

/// Escape the five HTML metacharacters: `& < > " '`.
///
/// The escape set is deliberately exactly these five. Anything wider (e.g.
/// `/`) would change which entities appear in output and complicate the
/// alignment contract for no safety gain on text content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Replace the leading whitespace run of `escaped` with the leading run of
/// `original`, converting each space to `&nbsp;`. Tabs and other whitespace
/// pass through unchanged.
///
/// Escaping never alters whitespace, so the two leading runs are identical;
/// the original is consulted so callers can hand in an already-transformed
/// string without re-deriving the indent.
pub fn preserve_indentation(escaped: &str, original: &str) -> String {
    let lead_len = original
        .chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| c.len_utf8())
        .sum::<usize>();
    if lead_len == 0 {
        return escaped.to_string();
    }
    let indent = original[..lead_len].replace(' ', "&nbsp;");
    format!("{indent}{}", escaped.trim_start())
}
