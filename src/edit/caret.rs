//! Caret and selection geometry over display strings.
//!
//! Offsets are character offsets. A caret may never sit inside the literal
//! prefix or suffix: the valid range for a non-empty display is
//! `[prefix_len, display_len - suffix_len]`, and `[0, 0]` for an empty one.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::mask::config::MaskConfig;
use crate::normalize::affix::{find_char_in, number_region};

/// A caret or selection range, normalized so `start <= end`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    #[inline]
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Clamp a single caret offset into the editable number region.
#[inline]
pub fn clamp_caret(display: &str, config: &MaskConfig, offset: usize) -> usize {
    let region = number_region(display, config);
    offset.clamp(region.start, region.end)
}

/// Clamp a caret or selection so that neither end lies inside the prefix or
/// suffix. A selection overlapping decoration is narrowed to the number.
pub fn clamp_selection(display: &str, config: &MaskConfig, start: usize, end: usize) -> Selection {
    let region = number_region(display, config);
    let selection = Selection::new(start, end);
    Selection {
        start: selection.start.clamp(region.start, region.end),
        end: selection.end.clamp(region.start, region.end),
    }
}

/// End of the integer part inside `region`: the index of the decimal
/// separator if one is rendered, else the end of the region.
pub fn integer_end(display: &str, config: &MaskConfig, region: Range<usize>) -> usize {
    decimal_index(display, config, region.clone()).unwrap_or(region.end)
}

/// Index of the rendered decimal separator inside `region`.
///
/// Integer-only masks never render one, so any matching character there
/// would belong to something else and is ignored.
pub fn decimal_index(display: &str, config: &MaskConfig, region: Range<usize>) -> Option<usize> {
    if !config.has_fraction() {
        return None;
    }
    find_char_in(display, config.decimal_separator, region)
}

/// Offset just past the `count`-th canonical character (digit or sign) of
/// the number region, skipping grouping separators.
///
/// `count == 0` maps to the start of the region; a count larger than the
/// number of canonical characters maps to the end of the region.
pub fn offset_after_canonical(display: &str, region: Range<usize>, count: usize) -> usize {
    if count == 0 {
        return region.start;
    }
    let mut seen = 0;
    for (index, c) in display
        .chars()
        .enumerate()
        .skip(region.start)
        .take(region.end.saturating_sub(region.start))
    {
        if c.is_ascii_digit() || c == '-' {
            seen += 1;
            if seen == count {
                return index + 1;
            }
        }
    }
    region.end
}
