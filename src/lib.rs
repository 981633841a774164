#![forbid(unsafe_code)]

//! Numeric input masking.
//!
//! The engine keeps a canonical numeric string (`-?\d*(\.\d*)?`, always `.`
//! as decimal point) and a formatted display string in step, one keystroke
//! at a time, and says where the caret belongs afterwards. All engine
//! operations are pure and total; errors only exist at the configuration and
//! CLI edges.

pub mod binding;
pub mod cli;
pub mod edit;
pub mod format;
pub mod mask;
pub mod normalize;
pub mod orchestrator;
pub mod output;

pub use binding::{BindingError, BindingKind, FieldBinding};
pub use edit::caret::{Selection, clamp_selection};
pub use edit::reconcile::{EditEvent, Reconciled, ReconciliationResult, reconcile, reconcile_edit};
pub use edit::shape::EditShape;
pub use edit::sync::sync_display;
pub use format::display::format_display;
pub use mask::config::{ConfigError, InputMode, MaskConfig};
pub use normalize::canonical::canonicalize;

/// Run the nmask CLI. Returns exit code (0 or 2).
pub fn run() -> Result<u8, Box<dyn std::error::Error>> {
    use std::io::{self, Write};

    let args = match cli::args::Args::parse() {
        Ok(args) => args,
        Err(err) => {
            err.print()?;
            return Ok(if err.use_stderr() { 2 } else { 0 });
        }
    };

    let result = orchestrator::run(&args)?;
    let mode = if args.json {
        cli::exit::OutputMode::Json
    } else {
        cli::exit::OutputMode::Human
    };
    let stream = cli::exit::output_stream(result.outcome, mode);

    if !result.completed.is_empty() {
        let mut stdout = io::stdout();
        stdout.write_all(result.completed.as_bytes())?;
        stdout.flush()?;
    }

    match stream {
        cli::exit::OutputStream::Stdout => {
            let mut stdout = io::stdout();
            stdout.write_all(result.output.as_bytes())?;
            stdout.flush()?;
        }
        cli::exit::OutputStream::Stderr => {
            let mut stderr = io::stderr();
            stderr.write_all(result.output.as_bytes())?;
            stderr.flush()?;
        }
    }

    Ok(cli::exit::exit_code(result.outcome))
}
