//! Balanced-backtick code span scanner.
//!
//! The matching rule: an opening run of N backticks closes at the next
//! backtick run of exactly N backticks, and the content in between may only
//! contain runs shorter than N. A run longer than N kills the candidate
//! opener entirely (the next run then becomes the opener). Content must be
//! non-empty. A back-reference regex would express this directly, but the
//! `regex` crate has no back-references, so this is a hand scanner.

/// A matched code span, byte-addressed into the scanned line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSpan {
    /// Byte offset of the first opening backtick.
    pub start: usize,
    /// Byte offset one past the last closing backtick.
    pub end: usize,
    /// Number of backticks in the delimiter runs.
    pub ticks: usize,
}

impl CodeSpan {
    /// The delimiter text (`` ` `` repeated `ticks` times).
    pub fn delimiter(&self) -> String {
        "`".repeat(self.ticks)
    }

    /// The content between the delimiter runs of `line`.
    pub fn content<'a>(&self, line: &'a str) -> &'a str {
        &line[self.start + self.ticks..self.end - self.ticks]
    }
}

/// Find all code spans in `line`, left to right, non-overlapping.
pub fn find_spans(line: &str) -> Vec<CodeSpan> {
    // Maximal backtick runs as (byte offset, length).
    let bytes = line.as_bytes();
    let mut runs: Vec<(usize, usize)> = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'`' {
            let start = i;
            while i < bytes.len() && bytes[i] == b'`' {
                i += 1;
            }
            runs.push((start, i - start));
        } else {
            i += 1;
        }
    }

    let mut spans = Vec::new();
    let mut r = 0;
    while r < runs.len() {
        let (open_pos, open_len) = runs[r];
        let mut matched = None;
        for (j, &(close_pos, close_len)) in runs.iter().enumerate().skip(r + 1) {
            if close_len < open_len {
                continue; // shorter run, allowed inside the content
            }
            // First run >= N decides the candidate: exactly N with non-empty
            // content closes it, anything else fails this opener.
            if close_len == open_len && close_pos > open_pos + open_len {
                matched = Some((j, close_pos));
            }
            break;
        }
        match matched {
            Some((j, close_pos)) => {
                spans.push(CodeSpan {
                    start: open_pos,
                    end: close_pos + open_len,
                    ticks: open_len,
                });
                r = j + 1;
            }
            None => r += 1,
        }
    }
    spans
}
