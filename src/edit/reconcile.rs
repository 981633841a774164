//! Per-keystroke reconciliation: raw edit to (canonical, display, caret).
//!
//! The caret anchor for integer edits is the number of canonical characters
//! in front of the caret in the raw text. Re-walking that count over the new
//! display keeps the caret next to the same digit while grouping separators
//! appear or disappear around it. Fraction edits move 1:1 with the typed
//! characters because the fraction is never grouped.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::edit::caret::{decimal_index, integer_end, offset_after_canonical};
use crate::edit::shape::EditShape;
use crate::format::display::format_display;
use crate::mask::config::MaskConfig;
use crate::normalize::affix::{
    char_at, char_len, find_char_in, is_decoration_only, number_region, take_chars,
};
use crate::normalize::canonical::{
    canonicalize, normalized_value, split_canonical, trim_integer,
};

/// Snapshot of the editable surface right after one keystroke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditEvent {
    pub raw_text: String,
    pub caret_offset: usize,
}

impl EditEvent {
    pub fn new(raw_text: impl Into<String>, caret_offset: usize) -> Self {
        Self {
            raw_text: raw_text.into(),
            caret_offset,
        }
    }

    /// An event with the caret at the end of the text (typing at the end, or
    /// a paste that replaced everything).
    pub fn at_end(raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        let caret_offset = char_len(&raw_text);
        Self {
            raw_text,
            caret_offset,
        }
    }
}

/// Authoritative post-edit state. The host commits `display_value` first and
/// then places its caret at `caret_offset`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    pub canonical_value: String,
    pub display_value: String,
    pub caret_offset: usize,
}

impl ReconciliationResult {
    fn cleared() -> Self {
        Self::default()
    }
}

/// A reconciliation result together with the branch that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciled {
    pub shape: EditShape,
    #[serde(flatten)]
    pub result: ReconciliationResult,
}

/// Reconcile one edit. See [`reconcile_edit`] for the branch taken.
pub fn reconcile(
    previous_display: &str,
    event: &EditEvent,
    config: &MaskConfig,
) -> ReconciliationResult {
    reconcile_edit(previous_display, event, config).result
}

pub fn reconcile_edit(previous_display: &str, event: &EditEvent, config: &MaskConfig) -> Reconciled {
    let raw = event.raw_text.as_str();
    let caret = event.caret_offset.min(char_len(raw));
    let canonical = canonicalize(raw, config);

    let reconciled = if canonical.is_empty() {
        let shape = if is_decoration_only(raw, config) {
            EditShape::Empty
        } else {
            EditShape::Residue
        };
        Reconciled {
            shape,
            result: ReconciliationResult::cleared(),
        }
    } else if canonical == "-" {
        sign_only(config)
    } else {
        numeric_edit(previous_display, raw, caret, &canonical, config)
    };

    trace!(
        shape = reconciled.shape.as_str(),
        raw_caret = caret,
        caret = reconciled.result.caret_offset,
        "reconciled edit"
    );
    reconciled
}

fn sign_only(config: &MaskConfig) -> Reconciled {
    let mut display_value = String::with_capacity(config.prefix.len() + config.suffix.len() + 1);
    display_value.push_str(&config.prefix);
    display_value.push('-');
    display_value.push_str(&config.suffix);
    Reconciled {
        shape: EditShape::SignOnly,
        result: ReconciliationResult {
            canonical_value: "-".to_string(),
            display_value,
            caret_offset: config.prefix_len() + 1,
        },
    }
}

fn numeric_edit(
    previous_display: &str,
    raw: &str,
    caret: usize,
    canonical: &str,
    config: &MaskConfig,
) -> Reconciled {
    let (negative, raw_int, frac_part) = split_canonical(canonical);
    let int_part = trim_integer(raw_int);

    let raw_region = number_region(raw, config);
    let raw_decimal = if config.has_fraction() {
        find_char_in(raw, config.decimal_separator, raw_region)
    } else {
        None
    };
    // A separator right before the caret starts a fresh fraction unless it
    // was already there and still has digits after it (a deletion next to it).
    let typed_decimal = caret > 0
        && raw_decimal == Some(caret - 1)
        && (char_at(previous_display, caret - 1) != Some(config.decimal_separator)
            || frac_part.is_none_or(str::is_empty));

    let (canonical_value, display_value) = if typed_decimal {
        let mut value = String::with_capacity(int_part.len() + 2);
        if negative {
            value.push('-');
        }
        value.push_str(int_part);
        value.push('.');
        let display = format_display(&value, config, true);
        (value, display)
    } else {
        let value = normalized_value(negative, int_part, frac_part, config);
        let display = format_display(&value, config, false);
        (value, display)
    };

    let region = number_region(&display_value, config);
    let new_decimal = decimal_index(&display_value, config, region.clone());

    // Only a raw caret already on the fraction side may land after the
    // separator; a caret in front of it stays in the integer part.
    let past_raw_decimal = raw_decimal.is_some_and(|raw_index| caret > raw_index);
    let (shape, caret_offset) = match new_decimal {
        Some(index) if typed_decimal => (EditShape::DecimalTyped, index + 1),
        Some(index)
            if past_raw_decimal && (caret == index + 1 || raw_decimal == Some(caret - 1)) =>
        {
            (EditShape::DecimalAdjacent, index + 1)
        }
        Some(index) if past_raw_decimal => {
            let typed = raw
                .chars()
                .take(caret)
                .skip(raw_decimal.map_or(0, |raw_index| raw_index + 1))
                .filter(char::is_ascii_digit)
                .count();
            let rendered = region.end.saturating_sub(index + 1);
            (EditShape::Fraction, index + 1 + typed.min(rendered))
        }
        _ => {
            let before = canonicalize(take_chars(raw, caret), config);
            // leading zeros in front of the caret that the display drops
            let (_, int_before, _) = split_canonical(&before);
            let zeros_before = int_before.len() - int_before.trim_start_matches('0').len();
            let stripped = raw_int.len().saturating_sub(int_part.len());
            let relative_pos = before.chars().count() - zeros_before.min(stripped);
            let anchored = offset_after_canonical(&display_value, region.clone(), relative_pos);
            let limit = integer_end(&display_value, config, region.clone());
            (EditShape::Integer, anchored.min(limit))
        }
    };

    Reconciled {
        shape,
        result: ReconciliationResult {
            caret_offset: caret_offset.clamp(region.start, region.end),
            canonical_value,
            display_value,
        },
    }
}
