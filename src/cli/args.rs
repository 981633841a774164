use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::separator::parse_separator_arg;
use crate::mask::config::{MaskConfig, parse_config_json, validate_decimal_digits};

/// CLI argument parsing & validation.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "nmask",
    version,
    about = "Numeric input masking: canonicalize, format, and reconcile keystroke edits."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub mask: MaskArgs,

    /// Emit JSON output (one object per result).
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Render a canonical value as display text.
    Format {
        /// Canonical value, e.g. -1234.5
        #[arg(value_name = "VALUE", allow_hyphen_values = true)]
        value: String,

        /// Keep a trailing bare decimal separator (in-progress typing).
        #[arg(long)]
        preserve_separator: bool,
    },

    /// Reduce raw display text to its canonical value.
    Canonicalize {
        #[arg(value_name = "TEXT", allow_hyphen_values = true)]
        text: String,
    },

    /// Reconcile one raw edit against the previous display.
    Reconcile {
        /// Display text before the edit.
        #[arg(long, value_name = "DISPLAY", default_value = "", allow_hyphen_values = true)]
        previous: String,

        /// Raw text right after the keystroke.
        #[arg(long, value_name = "TEXT", allow_hyphen_values = true)]
        raw: String,

        /// Caret offset in characters (default: end of the raw text).
        #[arg(long, value_name = "N")]
        caret: Option<usize>,
    },

    /// Clamp a caret or selection out of the prefix/suffix.
    Clamp {
        #[arg(value_name = "DISPLAY", allow_hyphen_values = true)]
        display: String,

        #[arg(value_name = "START")]
        start: usize,

        /// Selection end (default: same as start).
        #[arg(value_name = "END")]
        end: Option<usize>,
    },

    /// Replay JSON-lines edit events from stdin, threading each display into
    /// the next edit.
    Replay,
}

/// Mask settings shared by every subcommand. Flags override `--config`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct MaskArgs {
    /// JSON mask configuration file (thousandsSeparator, decimalSeparator, ...).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Thousands separator (dot/comma/space/nbsp/apostrophe, U+XXXX, or one character).
    #[arg(long, global = true, value_name = "SEP", value_parser = parse_separator)]
    pub thousands: Option<char>,

    /// Decimal separator (same forms as --thousands).
    #[arg(long, global = true, value_name = "SEP", value_parser = parse_separator)]
    pub decimal: Option<char>,

    /// Fraction digits: x >= 0 (0 = integer only).
    #[arg(long, global = true, value_name = "N", value_parser = parse_digits, allow_hyphen_values = true)]
    pub digits: Option<u32>,

    /// Literal text shown before the number.
    #[arg(long, global = true, value_name = "TEXT", allow_hyphen_values = true)]
    pub prefix: Option<String>,

    /// Literal text shown after the number.
    #[arg(long, global = true, value_name = "TEXT", allow_hyphen_values = true)]
    pub suffix: Option<String>,

    /// Accept a leading minus sign.
    #[arg(long, global = true)]
    pub allow_negative: bool,
}

impl Args {
    pub fn parse() -> Result<Self, clap::Error> {
        Self::try_parse()
    }
}

impl MaskArgs {
    /// Build the effective mask: config file (or defaults), then flags.
    pub fn resolve(&self) -> Result<MaskConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|err| format!("cannot read {}: {err}", path.display()))?;
                parse_config_json(&text)?
            }
            None => MaskConfig::default(),
        };

        if let Some(thousands) = self.thousands {
            config.thousands_separator = thousands;
        }
        if let Some(decimal) = self.decimal {
            config.decimal_separator = decimal;
        }
        if let Some(digits) = self.digits {
            config.decimal_digits = digits;
        }
        if let Some(prefix) = &self.prefix {
            config.prefix.clone_from(prefix);
        }
        if let Some(suffix) = &self.suffix {
            config.suffix.clone_from(suffix);
        }
        if self.allow_negative {
            config.allow_negative = true;
        }
        Ok(config)
    }
}

fn parse_separator(raw: &str) -> Result<char, String> {
    parse_separator_arg(raw).map_err(|err| err.to_string())
}

fn parse_digits(raw: &str) -> Result<u32, String> {
    let value = raw
        .parse::<i64>()
        .map_err(|_| "digits must be an integer".to_string())?;
    validate_decimal_digits(value).map_err(|err| err.to_string())
}
