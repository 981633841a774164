//! Separator flag parsing & validation.

/// Error returned when a separator flag cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeparatorError {
    Empty,
    InvalidCodePoint,
    InvalidValue,
    Reserved(char),
}

impl std::fmt::Display for SeparatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeparatorError::Empty => write!(f, "separator is empty"),
            SeparatorError::InvalidCodePoint => {
                write!(f, "invalid code point separator; expected U+XXXX")
            }
            SeparatorError::InvalidValue => write!(f, "separator must be a single character"),
            SeparatorError::Reserved(c) => {
                write!(f, "{c:?} cannot be used as a separator")
            }
        }
    }
}

impl std::error::Error for SeparatorError {}

/// Parse a separator flag into a single character.
///
/// Accepted inputs (case-insensitive for keywords/code points):
/// - named: dot, comma, space, nbsp, thinsp, apostrophe, underscore
/// - code point: U+XXXX (1 to 6 hex digits)
/// - a single character literal
///
/// Digits, `-` and control characters are refused: they would be read back
/// as part of the number.
pub fn parse_separator_arg(raw: &str) -> Result<char, SeparatorError> {
    if raw.is_empty() {
        return Err(SeparatorError::Empty);
    }

    let lower = raw.to_ascii_lowercase();
    match lower.as_str() {
        "dot" | "period" => return Ok('.'),
        "comma" => return Ok(','),
        "space" => return Ok(' '),
        "nbsp" => return Ok('\u{a0}'),
        "thinsp" => return Ok('\u{2009}'),
        "apostrophe" => return Ok('\''),
        "underscore" => return Ok('_'),
        _ => {}
    }

    if let Some(hex) = lower.strip_prefix("u+") {
        if hex.is_empty() || hex.len() > 6 {
            return Err(SeparatorError::InvalidCodePoint);
        }
        let code = u32::from_str_radix(hex, 16).map_err(|_| SeparatorError::InvalidCodePoint)?;
        let c = char::from_u32(code).ok_or(SeparatorError::InvalidCodePoint)?;
        return validate_separator_char(c);
    }

    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => validate_separator_char(c),
        _ => Err(SeparatorError::InvalidValue),
    }
}

fn validate_separator_char(c: char) -> Result<char, SeparatorError> {
    if c.is_ascii_digit() || c == '-' || c.is_control() {
        return Err(SeparatorError::Reserved(c));
    }
    Ok(c)
}
