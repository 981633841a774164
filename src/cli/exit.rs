//! Exit codes & stdout/stderr routing.

/// Domain outcome produced by a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Rendered,
    Invalid,
}

/// Output mode chosen by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Target stream for output emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// Exit code for a given outcome.
pub fn exit_code(outcome: Outcome) -> u8 {
    match outcome {
        Outcome::Rendered => 0,
        Outcome::Invalid => 2,
    }
}

/// Output stream for a given outcome and output mode.
///
/// In JSON mode, everything goes to stdout.
/// In human mode, invalid input is reported on stderr.
pub fn output_stream(outcome: Outcome, mode: OutputMode) -> OutputStream {
    match (mode, outcome) {
        (OutputMode::Json, _) => OutputStream::Stdout,
        (OutputMode::Human, Outcome::Invalid) => OutputStream::Stderr,
        (OutputMode::Human, Outcome::Rendered) => OutputStream::Stdout,
    }
}
