// turnstile-console/src/filter/highlight.rs
// Case-insensitive matching and matched-text segmentation

use std::ops::Range;

/// A run of cell text, either matched by the search or not
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub matched: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            matched: false,
        }
    }

    pub fn matched(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            matched: true,
        }
    }
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Byte range of the first case-insensitive occurrence of `needle`
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    if needle.is_empty() {
        return None;
    }
    let needle_len = needle.chars().count();

    for (start, _) in haystack.char_indices() {
        let mut candidate = haystack[start..].char_indices();
        let mut end = start;
        let mut matched = 0;
        for expected in needle.chars() {
            match candidate.next() {
                Some((offset, actual)) if chars_eq_ignore_case(actual, expected) => {
                    end = start + offset + actual.len_utf8();
                    matched += 1;
                }
                _ => break,
            }
        }
        if matched == needle_len {
            return Some(start..end);
        }
    }
    None
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || find_ignore_case(haystack, needle).is_some()
}

/// Split `text` around every case-insensitive, non-overlapping occurrence of
/// `needle`. The original casing of `text` is preserved.
pub fn highlight(text: &str, needle: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut rest = text;

    while let Some(range) = find_ignore_case(rest, needle) {
        if range.start > 0 {
            segments.push(Segment::plain(&rest[..range.start]));
        }
        segments.push(Segment::matched(&rest[range.clone()]));
        rest = &rest[range.end..];
    }
    if !rest.is_empty() || segments.is_empty() {
        segments.push(Segment::plain(rest));
    }
    segments
}
