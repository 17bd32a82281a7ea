//! Quote- and brace-aware scanning over table-literal text.
//!
//! A character is *top-level* when it is outside every quoted string and at
//! brace depth zero relative to where the scan started. Separators (`,`
//! between elements, `=` between key and value) only count at the top level,
//! so `{ a = 'x, y', b = { c = 1 } }` splits into exactly two elements.
//!
//! Quotes toggle string state unless the previous character is a backslash.
//! A quote of the other style inside a string is ordinary text. Braces inside
//! strings are ignored; outside strings they are only counted, never matched
//! against each other.

/// Left-to-right scanner state: the quote that opened the current string
/// (if any), the brace depth, and the previous character for escape detection.
#[derive(Debug, Default)]
pub(crate) struct DelimiterScanner {
    string_char: Option<char>,
    brace_depth: i32,
    prev: Option<char>,
}

impl DelimiterScanner {
    /// Advance over `ch`. Returns `true` when `ch` is an ordinary character at
    /// the top level, i.e. a candidate separator.
    pub(crate) fn feed(&mut self, ch: char) -> bool {
        let escaped = self.prev == Some('\\');
        self.prev = Some(ch);

        match ch {
            '\'' | '"' if !escaped => {
                match self.string_char {
                    None => self.string_char = Some(ch),
                    Some(open) if open == ch => self.string_char = None,
                    Some(_) => {}
                }
                false
            }
            '{' if self.string_char.is_none() => {
                self.brace_depth += 1;
                false
            }
            '}' if self.string_char.is_none() => {
                self.brace_depth -= 1;
                false
            }
            _ => self.string_char.is_none() && self.brace_depth == 0,
        }
    }

    pub(crate) fn in_string(&self) -> bool {
        self.string_char.is_some()
    }

    pub(crate) fn depth(&self) -> i32 {
        self.brace_depth
    }
}

/// Split `text` at every top-level `sep`. Segments are trimmed and empty
/// segments are dropped, so a trailing `,` before `}` yields nothing.
pub(crate) fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut scanner = DelimiterScanner::default();
    let mut start = 0;

    for (i, ch) in text.char_indices() {
        if scanner.feed(ch) && ch == sep {
            push_segment(&mut parts, &text[start..i]);
            start = i + ch.len_utf8();
        }
    }
    push_segment(&mut parts, &text[start..]);
    parts
}

fn push_segment<'a>(parts: &mut Vec<&'a str>, segment: &'a str) {
    let segment = segment.trim();
    if !segment.is_empty() {
        parts.push(segment);
    }
}

/// Byte offset of the first top-level `sep` in `text`.
pub(crate) fn find_top_level(text: &str, sep: char) -> Option<usize> {
    let mut scanner = DelimiterScanner::default();
    text.char_indices()
        .find(|&(_, ch)| scanner.feed(ch) && ch == sep)
        .map(|(i, _)| i)
}

/// Split `text` around its first top-level `sep`, trimming both halves.
pub(crate) fn split_once_top_level(text: &str, sep: char) -> Option<(&str, &str)> {
    let at = find_top_level(text, sep)?;
    Some((text[..at].trim(), text[at + sep.len_utf8()..].trim()))
}

/// Byte offset of the `}` that closes the `{` at the start of `text`.
///
/// Returns `None` when `text` does not start with `{` or the brace is never
/// closed.
pub(crate) fn closing_brace(text: &str) -> Option<usize> {
    if !text.starts_with('{') {
        return None;
    }
    let mut scanner = DelimiterScanner::default();
    for (i, ch) in text.char_indices() {
        scanner.feed(ch);
        if ch == '}' && !scanner.in_string() && scanner.depth() == 0 {
            return Some(i);
        }
    }
    None
}
