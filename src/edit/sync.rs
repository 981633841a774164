//! Re-deriving the display after the canonical value changed elsewhere.

use crate::format::display::format_display;
use crate::mask::config::MaskConfig;
use crate::normalize::affix::{char_at, number_region};
use crate::normalize::canonical::canonicalize;

/// Display for a canonical value set by someone other than the reconciler.
///
/// A display that ends in a bare decimal separator is an in-progress edit;
/// it is kept when the incoming value is the number it already shows, so a
/// refresh racing with a keystroke cannot eat the separator.
pub fn sync_display(current_display: &str, canonical: &str, config: &MaskConfig) -> String {
    if ends_in_bare_separator(current_display, config) {
        let shown = canonicalize(current_display, config);
        if same_number(&shown, canonical) {
            return current_display.to_string();
        }
    }
    format_display(canonical, config, false)
}

/// Whether the number region of `display` ends with the decimal separator.
pub fn ends_in_bare_separator(display: &str, config: &MaskConfig) -> bool {
    if !config.has_fraction() {
        return false;
    }
    let region = number_region(display, config);
    region.end > region.start && char_at(display, region.end - 1) == Some(config.decimal_separator)
}

fn same_number(a: &str, b: &str) -> bool {
    a.trim_end_matches('.') == b.trim_end_matches('.')
}
