//! Prefix/suffix handling and character-offset helpers.
//!
//! All offsets exposed by the engine count characters, not bytes. The helpers
//! here are the only place that converts between the two.

use std::ops::Range;

use crate::mask::config::MaskConfig;

/// Strip one leading prefix and one trailing suffix, if present.
#[inline]
pub fn strip_affixes<'a>(text: &'a str, config: &MaskConfig) -> &'a str {
    let body = text.strip_prefix(config.prefix.as_str()).unwrap_or(text);
    body.strip_suffix(config.suffix.as_str()).unwrap_or(body)
}

/// Returns true if the text is empty or nothing but literal decoration:
/// exactly the prefix, the suffix, or prefix followed by suffix.
pub fn is_decoration_only(text: &str, config: &MaskConfig) -> bool {
    if text.is_empty() || text == config.prefix || text == config.suffix {
        return true;
    }
    text.strip_prefix(config.prefix.as_str())
        .is_some_and(|rest| rest == config.suffix)
}

/// Character range of the editable number between prefix and suffix.
///
/// Decoration that is not actually present in `display` is not skipped, so
/// the range stays valid for partially edited text.
pub fn number_region(display: &str, config: &MaskConfig) -> Range<usize> {
    let len = char_len(display);
    if len == 0 {
        return 0..0;
    }
    let start = if display.starts_with(config.prefix.as_str()) {
        config.prefix_len()
    } else {
        0
    };
    let end = if display.ends_with(config.suffix.as_str()) {
        len.saturating_sub(config.suffix_len())
    } else {
        len
    };
    start.min(end)..end
}

#[inline]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of the `index`-th character; clamps to the end of `text`.
#[inline]
pub fn byte_offset(text: &str, index: usize) -> usize {
    text.char_indices()
        .nth(index)
        .map_or(text.len(), |(offset, _)| offset)
}

/// The first `count` characters of `text`.
#[inline]
pub fn take_chars(text: &str, count: usize) -> &str {
    &text[..byte_offset(text, count)]
}

/// Character at `index`, if any.
#[inline]
pub fn char_at(text: &str, index: usize) -> Option<char> {
    text.chars().nth(index)
}

/// Character index of the first `needle` inside `range`.
pub fn find_char_in(text: &str, needle: char, range: Range<usize>) -> Option<usize> {
    text.chars()
        .enumerate()
        .skip(range.start)
        .take(range.end.saturating_sub(range.start))
        .find_map(|(index, c)| (c == needle).then_some(index))
}
