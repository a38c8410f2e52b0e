//! Visible-text extraction.
//!
//! Reads rendered HTML back to the text a user sees, one entry per source
//! line. This is the inverse side of the alignment guarantee: for any input
//! without promoted tables, [`visible_lines`] of the rendered HTML gives the
//! source lines back, with blank lines coming back as a single space.

/// Extract the visible text of rendered HTML, split into lines.
///
/// Line-ending tags become line breaks, all other tags drop out, entities
/// decode, and the non-breaking spaces used as indentation placeholders
/// come back as plain spaces.
pub fn visible_lines(html: &str) -> Vec<String> {
    let with_breaks = html
        .replace("</div>", "\n")
        .replace("</pre>", "\n")
        .replace("</li>", "\n")
        .replace("</tr>", "\n");

    let mut text = String::with_capacity(with_breaks.len());
    let mut in_tag = false;
    for ch in with_breaks.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            _ => text.push(ch),
        }
    }

    let decoded = html_escape::decode_html_entities(&text);
    let spaced = decoded.replace('\u{00A0}', " ");

    let mut lines: Vec<String> = spaced.split('\n').map(str::to_string).collect();
    // Every line-ending tag appends a break, so the split leaves one empty
    // trailing entry behind.
    if lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

/// The visible text of rendered HTML as one newline-joined string.
pub fn plain_text(html: &str) -> String {
    visible_lines(html).join("\n")
}
