// Thousands grouping of integer digit runs

/// Insert `separator` every three digits, counted from the least-significant
/// end. The input is expected to be a run of ASCII digits with no sign.
pub fn group_digits(digits: &str, separator: char) -> String {
    let bytes = digits.as_bytes();
    let mut out =
        String::with_capacity(digits.len() + separator_count(digits.len()) * separator.len_utf8());
    if bytes.is_empty() {
        return out;
    }

    let first_group = if bytes.len().is_multiple_of(3) {
        3
    } else {
        bytes.len() % 3
    };
    out.push_str(&digits[..first_group]);
    let mut idx = first_group;
    while idx < bytes.len() {
        out.push(separator);
        out.push_str(&digits[idx..idx + 3]);
        idx += 3;
    }
    out
}

/// Number of separators a run of `digit_count` digits receives.
#[inline]
pub const fn separator_count(digit_count: usize) -> usize {
    if digit_count == 0 {
        0
    } else {
        (digit_count - 1) / 3
    }
}
