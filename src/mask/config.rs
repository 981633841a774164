//! Mask configuration: separators, fraction width, decoration, sign policy.

use serde::{Deserialize, Serialize};

/// Error returned when a mask configuration cannot be built from external input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A separator was given as something other than exactly one character.
    SeparatorLength { field: &'static str, value: String },
    NegativeDecimalDigits(i64),
    DecimalDigitsTooLarge(i64),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::SeparatorLength { field, value } => {
                write!(f, "{field} must be a single character, got {value:?}")
            }
            ConfigError::NegativeDecimalDigits(digits) => {
                write!(f, "decimalDigits must be >= 0, got {digits}")
            }
            ConfigError::DecimalDigitsTooLarge(digits) => {
                write!(f, "decimalDigits is out of range: {digits}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Virtual keyboard hint for the host's editable surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    Numeric,
    Decimal,
}

impl InputMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            InputMode::Numeric => "numeric",
            InputMode::Decimal => "decimal",
        }
    }
}

/// Immutable per-field mask settings.
///
/// Equal separators are legal: the shared character is then the decimal
/// point and no thousands grouping is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMaskConfig", rename_all = "camelCase")]
pub struct MaskConfig {
    pub thousands_separator: char,
    pub decimal_separator: char,
    pub decimal_digits: u32,
    pub prefix: String,
    pub suffix: String,
    pub allow_negative: bool,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            thousands_separator: '.',
            decimal_separator: ',',
            decimal_digits: 0,
            prefix: String::new(),
            suffix: String::new(),
            allow_negative: false,
        }
    }
}

impl MaskConfig {
    #[must_use]
    pub fn with_separators(mut self, thousands: char, decimal: char) -> Self {
        self.thousands_separator = thousands;
        self.decimal_separator = decimal;
        self
    }

    #[must_use]
    pub fn with_decimal_digits(mut self, digits: u32) -> Self {
        self.decimal_digits = digits;
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    #[must_use]
    pub fn with_allow_negative(mut self, allow: bool) -> Self {
        self.allow_negative = allow;
        self
    }

    /// Thousands grouping is rendered only when it cannot be confused with
    /// the decimal point.
    #[inline]
    pub fn groups_thousands(&self) -> bool {
        self.thousands_separator != self.decimal_separator
    }

    #[inline]
    pub fn has_fraction(&self) -> bool {
        self.decimal_digits > 0
    }

    /// Prefix length in characters.
    #[inline]
    pub fn prefix_len(&self) -> usize {
        self.prefix.chars().count()
    }

    /// Suffix length in characters.
    #[inline]
    pub fn suffix_len(&self) -> usize {
        self.suffix.chars().count()
    }

    pub fn input_mode(&self) -> InputMode {
        if self.has_fraction() {
            InputMode::Decimal
        } else {
            InputMode::Numeric
        }
    }
}

/// Wire shape of a mask configuration, using the option names hosts
/// already know (`thousandsSeparator`, `decimalDigits`, ...).
///
/// Every field is optional and falls back to [`MaskConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMaskConfig {
    pub thousands_separator: Option<String>,
    pub decimal_separator: Option<String>,
    pub decimal_digits: Option<i64>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub allow_negative: Option<bool>,
}

impl TryFrom<RawMaskConfig> for MaskConfig {
    type Error = ConfigError;

    fn try_from(raw: RawMaskConfig) -> Result<Self, Self::Error> {
        let defaults = MaskConfig::default();
        let thousands_separator = match raw.thousands_separator {
            Some(value) => single_char("thousandsSeparator", &value)?,
            None => defaults.thousands_separator,
        };
        let decimal_separator = match raw.decimal_separator {
            Some(value) => single_char("decimalSeparator", &value)?,
            None => defaults.decimal_separator,
        };
        let decimal_digits = match raw.decimal_digits {
            Some(digits) => validate_decimal_digits(digits)?,
            None => defaults.decimal_digits,
        };
        Ok(Self {
            thousands_separator,
            decimal_separator,
            decimal_digits,
            prefix: raw.prefix.unwrap_or(defaults.prefix),
            suffix: raw.suffix.unwrap_or(defaults.suffix),
            allow_negative: raw.allow_negative.unwrap_or(defaults.allow_negative),
        })
    }
}

/// Parse a mask configuration from a JSON document.
pub fn parse_config_json(input: &str) -> Result<MaskConfig, Box<dyn std::error::Error>> {
    let raw: RawMaskConfig = serde_json::from_str(input)?;
    Ok(MaskConfig::try_from(raw)?)
}

pub fn validate_decimal_digits(digits: i64) -> Result<u32, ConfigError> {
    if digits < 0 {
        return Err(ConfigError::NegativeDecimalDigits(digits));
    }
    u32::try_from(digits).map_err(|_| ConfigError::DecimalDigitsTooLarge(digits))
}

fn single_char(field: &'static str, value: &str) -> Result<char, ConfigError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigError::SeparatorLength {
            field,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dotted_thousands_comma_decimal() {
        let config = MaskConfig::default();
        assert_eq!(config.thousands_separator, '.');
        assert_eq!(config.decimal_separator, ',');
        assert_eq!(config.decimal_digits, 0);
        assert!(config.prefix.is_empty());
        assert!(config.suffix.is_empty());
        assert!(!config.allow_negative);
    }

    #[test]
    fn equal_separators_disable_grouping() {
        let config = MaskConfig::default().with_separators(',', ',');
        assert!(!config.groups_thousands());
        assert!(MaskConfig::default().groups_thousands());
    }

    #[test]
    fn input_mode_follows_decimal_digits() {
        assert_eq!(MaskConfig::default().input_mode(), InputMode::Numeric);
        assert_eq!(
            MaskConfig::default().with_decimal_digits(2).input_mode(),
            InputMode::Decimal
        );
    }

    #[test]
    fn affix_lengths_count_chars() {
        let config = MaskConfig::default().with_prefix("€ ").with_suffix(" ₽");
        assert_eq!(config.prefix_len(), 2);
        assert_eq!(config.suffix_len(), 2);
    }

    #[test]
    fn parses_partial_json_with_defaults() {
        let config =
            parse_config_json(r#"{"prefix":"Rp ","decimalDigits":2,"allowNegative":true}"#)
                .expect("config");
        assert_eq!(config.prefix, "Rp ");
        assert_eq!(config.decimal_digits, 2);
        assert!(config.allow_negative);
        assert_eq!(config.thousands_separator, '.');
    }

    #[test]
    fn rejects_negative_decimal_digits() {
        let raw = RawMaskConfig {
            decimal_digits: Some(-1),
            ..RawMaskConfig::default()
        };
        assert_eq!(
            MaskConfig::try_from(raw),
            Err(ConfigError::NegativeDecimalDigits(-1))
        );
    }

    #[test]
    fn rejects_multi_char_separator() {
        let raw = RawMaskConfig {
            thousands_separator: Some("..".to_string()),
            ..RawMaskConfig::default()
        };
        assert!(matches!(
            MaskConfig::try_from(raw),
            Err(ConfigError::SeparatorLength {
                field: "thousandsSeparator",
                ..
            })
        ));
        assert!(parse_config_json(r#"{"decimalSeparator":""}"#).is_err());
    }

    #[test]
    fn serializes_with_camel_case_names() {
        let value = serde_json::to_value(MaskConfig::default()).expect("json");
        assert_eq!(value["thousandsSeparator"], ".");
        assert_eq!(value["decimalDigits"], 0);
        assert_eq!(value["allowNegative"], false);
    }
}
