//! Raw display text to canonical value.
//!
//! Rules, applied in one left-to-right pass after prefix/suffix stripping:
//! - ASCII digits are kept.
//! - The first decimal separator becomes `.`; later ones are dropped so their
//!   digits join the fraction (typing a second separator is a no-op).
//! - `-` is kept only if negatives are allowed and nothing was kept before it.
//! - Everything else, including the thousands separator, is dropped.
//!
//! The result always matches `-?\d*(\.\d*)?` but may be a partial shape such
//! as `""`, `"-"` or `"."`.

use crate::mask::config::MaskConfig;
use crate::normalize::affix::strip_affixes;

pub fn canonicalize(raw_text: &str, config: &MaskConfig) -> String {
    let body = strip_affixes(raw_text, config);
    let mut out = String::with_capacity(body.len());
    let mut seen_decimal = false;

    for c in body.chars() {
        if c.is_ascii_digit() {
            out.push(c);
        } else if c == config.decimal_separator {
            if !seen_decimal {
                seen_decimal = true;
                out.push('.');
            }
        } else if c == '-' && config.allow_negative && out.is_empty() {
            out.push('-');
        }
    }

    out
}

/// Split a canonical value into `(negative, integer, fraction)`.
///
/// The fraction is `None` when the value has no decimal point at all and
/// `Some("")` when it ends in a bare point.
pub fn split_canonical(value: &str) -> (bool, &str, Option<&str>) {
    let (negative, unsigned) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };
    match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (negative, int_part, Some(frac_part)),
        None => (negative, unsigned, None),
    }
}

/// Strip leading zeros from an integer digit run, flooring to `"0"`.
pub fn trim_integer(int_part: &str) -> &str {
    let trimmed = int_part.trim_start_matches('0');
    if trimmed.is_empty() { "0" } else { trimmed }
}

/// Whether `value` already has the canonical shape `-?\d*(\.\d*)?`.
pub fn is_canonical(value: &str) -> bool {
    let unsigned = value.strip_prefix('-').unwrap_or(value);
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    int_part.bytes().all(|b| b.is_ascii_digit()) && frac_part.bytes().all(|b| b.is_ascii_digit())
}

/// Stored form of a canonical value: sign only if negatives are allowed,
/// integer without leading zeros, fraction truncated to the configured
/// width. Integer-only masks discard the fraction. An empty value or a lone
/// sign is stored as empty.
pub fn normalize_canonical(canonical: &str, config: &MaskConfig) -> String {
    let (negative, int_part, frac_part) = split_canonical(canonical);
    if int_part.is_empty() && frac_part.is_none() {
        return String::new();
    }
    normalized_value(
        negative && config.allow_negative,
        trim_integer(int_part),
        frac_part,
        config,
    )
}

/// Stored form of a value handed in by the host. Canonical input is taken
/// as is; anything else is read as display text first.
pub fn coerce_canonical(value: &str, config: &MaskConfig) -> String {
    if is_canonical(value) {
        normalize_canonical(value, config)
    } else {
        normalize_canonical(&canonicalize(value, config), config)
    }
}

/// Assemble sign, an already trimmed integer and the truncated fraction.
pub fn normalized_value(
    negative: bool,
    int_part: &str,
    frac_part: Option<&str>,
    config: &MaskConfig,
) -> String {
    let frac_len = frac_part.map_or(0, str::len);
    let mut value = String::with_capacity(int_part.len() + frac_len + 2);
    if negative {
        value.push('-');
    }
    value.push_str(int_part);
    if config.has_fraction()
        && let Some(frac_part) = frac_part
    {
        let fraction: String = frac_part
            .chars()
            .take(config.decimal_digits as usize)
            .collect();
        if !fraction.is_empty() {
            value.push('.');
            value.push_str(&fraction);
        }
    }
    value
}
