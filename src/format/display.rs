// Canonical value to display string

use crate::format::grouping::group_digits;
use crate::mask::config::MaskConfig;
use crate::normalize::canonical::{split_canonical, trim_integer};

/// Render a canonical value as `prefix + sign + grouped integer
/// [+ separator + fraction] + suffix`.
///
/// An empty value renders as an empty string, without decoration. The
/// fraction is truncated to `decimal_digits`, never rounded or padded, and
/// its separator is omitted when no fraction digit survives, unless
/// `preserve_trailing_separator` is set and the value ends in a bare point
/// (the state right after the user typed the separator).
pub fn format_display(value: &str, config: &MaskConfig, preserve_trailing_separator: bool) -> String {
    if value.is_empty() {
        return String::new();
    }

    let (negative, int_part, frac_part) = split_canonical(value);
    let int_digits: String = int_part.chars().filter(char::is_ascii_digit).collect();
    let int_digits = trim_integer(&int_digits);

    let mut out = String::with_capacity(
        config.prefix.len() + config.suffix.len() + value.len() + value.len() / 3 + 4,
    );
    out.push_str(&config.prefix);
    if negative && config.allow_negative {
        out.push('-');
    }
    if config.groups_thousands() {
        out.push_str(&group_digits(int_digits, config.thousands_separator));
    } else {
        out.push_str(int_digits);
    }

    if config.has_fraction() {
        if preserve_trailing_separator && value.ends_with('.') {
            out.push(config.decimal_separator);
        } else if let Some(frac_part) = frac_part {
            let fraction: String = frac_part
                .chars()
                .filter(char::is_ascii_digit)
                .take(config.decimal_digits as usize)
                .collect();
            if !fraction.is_empty() {
                out.push(config.decimal_separator);
                out.push_str(&fraction);
            }
        }
    }

    out.push_str(&config.suffix);
    out
}
