//! Command orchestration: resolve mask → run engine operation → render output

use std::error::Error;
use std::io::{self, BufRead};

use serde::Deserialize;
use serde_json::{Value, json};

use crate::cli::args::{Args, Command};
use crate::cli::exit::Outcome;
use crate::edit::caret::clamp_selection;
use crate::edit::reconcile::{EditEvent, reconcile_edit};
use crate::format::display::format_display;
use crate::mask::config::MaskConfig;
use crate::normalize::affix::char_len;
use crate::normalize::canonical::canonicalize;
use crate::output::human::{
    render_canonical, render_display, render_invalid, render_reconciled, render_replay_step,
    render_selection,
};
use crate::output::json::{JsonOutput, Operation, render_json};

pub struct PipelineResult {
    pub outcome: Outcome,
    /// Replay steps rendered before a failing line; always written to stdout.
    pub completed: String,
    pub output: String,
}

/// One line of `nmask replay` input. A missing caret means "end of text".
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayEvent {
    pub raw_text: String,
    #[serde(default)]
    pub caret_offset: Option<usize>,
}

impl ReplayEvent {
    fn into_edit(self) -> EditEvent {
        match self.caret_offset {
            Some(caret) => EditEvent::new(self.raw_text, caret),
            None => EditEvent::at_end(self.raw_text),
        }
    }
}

pub fn run(args: &Args) -> Result<PipelineResult, Box<dyn Error>> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    run_with_input(args, &mut input)
}

/// Same as [`run`], reading replay events from `input` instead of stdin.
pub fn run_with_input(
    args: &Args,
    input: &mut dyn BufRead,
) -> Result<PipelineResult, Box<dyn Error>> {
    let operation = operation_of(&args.command);
    let config = match args.mask.resolve() {
        Ok(config) => config,
        Err(err) => return invalid(args.json, operation, &err.to_string()),
    };

    match &args.command {
        Command::Canonicalize { text } => {
            let value = canonicalize(text, &config);
            if args.json {
                rendered_json(operation, json!({ "canonical_value": value }))
            } else {
                Ok(rendered_lines(render_canonical(&value)))
            }
        }
        Command::Format {
            value,
            preserve_separator,
        } => {
            let display = format_display(value, &config, *preserve_separator);
            if args.json {
                rendered_json(operation, json!({ "display_value": display }))
            } else {
                Ok(rendered_lines(render_display(&display)))
            }
        }
        Command::Reconcile {
            previous,
            raw,
            caret,
        } => {
            let event = EditEvent::new(raw.as_str(), caret.unwrap_or_else(|| char_len(raw)));
            let reconciled = reconcile_edit(previous, &event, &config);
            if args.json {
                rendered_json(operation, serde_json::to_value(&reconciled)?)
            } else {
                Ok(rendered_lines(render_reconciled(&reconciled)))
            }
        }
        Command::Clamp {
            display,
            start,
            end,
        } => {
            let selection = clamp_selection(display, &config, *start, end.unwrap_or(*start));
            if args.json {
                rendered_json(operation, serde_json::to_value(selection)?)
            } else {
                Ok(rendered_lines(render_selection(display, selection)))
            }
        }
        Command::Replay => replay(args.json, &config, input),
    }
}

fn replay(
    json_mode: bool,
    config: &MaskConfig,
    input: &mut dyn BufRead,
) -> Result<PipelineResult, Box<dyn Error>> {
    let mut lines = Vec::new();
    let mut previous_display = String::new();
    let mut step: u64 = 0;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        step += 1;
        let event: ReplayEvent = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(err) => {
                let message = format!("line {}: {err}", index + 1);
                let output = if json_mode {
                    let output = JsonOutput::invalid(Operation::Replay, message).with_step(step);
                    join_lines(vec![render_json(&output)?])
                } else {
                    join_lines(render_invalid(&message))
                };
                let completed = if lines.is_empty() {
                    String::new()
                } else {
                    join_lines(lines)
                };
                return Ok(PipelineResult {
                    outcome: Outcome::Invalid,
                    completed,
                    output,
                });
            }
        };

        let reconciled = reconcile_edit(&previous_display, &event.into_edit(), config);
        if json_mode {
            let output =
                JsonOutput::rendered(Operation::Replay, serde_json::to_value(&reconciled)?)
                    .with_step(step);
            lines.push(render_json(&output)?);
        } else {
            lines.push(render_replay_step(step, &reconciled));
        }
        previous_display = reconciled.result.display_value;
    }

    Ok(PipelineResult {
        outcome: Outcome::Rendered,
        completed: String::new(),
        output: join_lines(lines),
    })
}

fn operation_of(command: &Command) -> Operation {
    match command {
        Command::Canonicalize { .. } => Operation::Canonicalize,
        Command::Format { .. } => Operation::Format,
        Command::Reconcile { .. } => Operation::Reconcile,
        Command::Clamp { .. } => Operation::Clamp,
        Command::Replay => Operation::Replay,
    }
}

fn rendered_json(operation: Operation, result: Value) -> Result<PipelineResult, Box<dyn Error>> {
    let output = JsonOutput::rendered(operation, result);
    Ok(PipelineResult {
        outcome: Outcome::Rendered,
        completed: String::new(),
        output: join_lines(vec![render_json(&output)?]),
    })
}

fn rendered_lines(lines: Vec<String>) -> PipelineResult {
    PipelineResult {
        outcome: Outcome::Rendered,
        completed: String::new(),
        output: join_lines(lines),
    }
}

fn invalid(
    json_mode: bool,
    operation: Operation,
    message: &str,
) -> Result<PipelineResult, Box<dyn Error>> {
    let output = if json_mode {
        join_lines(vec![render_json(&JsonOutput::invalid(operation, message))?])
    } else {
        join_lines(render_invalid(message))
    };
    Ok(PipelineResult {
        outcome: Outcome::Invalid,
        completed: String::new(),
        output,
    })
}

fn join_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).expect("args")
    }

    fn run_str(argv: &[&str], input: &str) -> PipelineResult {
        let mut reader = input.as_bytes();
        run_with_input(&args(argv), &mut reader).expect("run")
    }

    #[test]
    fn canonicalize_human() {
        let result = run_str(&["nmask", "canonicalize", "Rp 1.234,5", "--prefix", "Rp "], "");
        assert_eq!(result.outcome, Outcome::Rendered);
        assert_eq!(result.output, "canonical: \"1234.5\"\n");
    }

    #[test]
    fn format_json() {
        let result = run_str(
            &["nmask", "format", "1234.567", "--digits", "2", "--json"],
            "",
        );
        let value: Value = serde_json::from_str(result.output.trim()).expect("json");
        assert_eq!(value["operation"], "format");
        assert_eq!(value["result"]["display_value"], "1.234,56");
    }

    #[test]
    fn reconcile_json_includes_shape() {
        let result = run_str(
            &[
                "nmask",
                "reconcile",
                "--previous",
                "1.234",
                "--raw",
                "1.234,",
                "--digits",
                "2",
                "--json",
            ],
            "",
        );
        let value: Value = serde_json::from_str(result.output.trim()).expect("json");
        assert_eq!(value["result"]["shape"], "decimal_typed");
        assert_eq!(value["result"]["canonical_value"], "1234.");
        assert_eq!(value["result"]["display_value"], "1.234,");
        assert_eq!(value["result"]["caret_offset"], 6);
    }

    #[test]
    fn clamp_defaults_end_to_start() {
        let result = run_str(&["nmask", "clamp", "Rp 5", "0", "--prefix", "Rp "], "");
        assert_eq!(result.output, "selection: 3..3\n           Rp |5\n");
    }

    #[test]
    fn replay_threads_previous_display() {
        let input = "{\"raw_text\":\"1\"}\n\n{\"raw_text\":\"12\"}\n{\"raw_text\":\"123\"}\n{\"raw_text\":\"1234\"}\n";
        let result = run_str(&["nmask", "replay"], input);
        assert_eq!(result.outcome, Outcome::Rendered);
        let lines: Vec<&str> = result.output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "#4 integer: \"1.234|\" canonical=\"1234\"");
    }

    #[test]
    fn replay_reports_bad_line() {
        let input = "{\"raw_text\":\"1\"}\nnot json\n";
        let result = run_str(&["nmask", "replay", "--json"], input);
        assert_eq!(result.outcome, Outcome::Invalid);
        let last = result.output.lines().last().expect("line");
        let value: Value = serde_json::from_str(last).expect("json");
        assert_eq!(value["outcome"], "INVALID");
        assert_eq!(value["step"], 2);
        assert!(
            value["error"]
                .as_str()
                .expect("error")
                .starts_with("line 2:")
        );
    }

    #[test]
    fn replay_keeps_finished_steps_apart_from_the_error() {
        let input = "{\"raw_text\":\"1\"}\nnot json\n{\"raw_text\":\"12\"}\n";
        let result = run_str(&["nmask", "replay"], input);
        assert_eq!(result.outcome, Outcome::Invalid);
        assert_eq!(result.completed, "#1 integer: \"1|\" canonical=\"1\"\n");
        assert!(result.output.starts_with("nmask: invalid input: line 2:"));
        assert!(!result.output.contains("#1"));
    }

    #[test]
    fn replay_failing_on_first_line_has_nothing_completed() {
        let result = run_str(&["nmask", "replay", "--json"], "not json\n");
        assert_eq!(result.outcome, Outcome::Invalid);
        assert!(result.completed.is_empty());
        assert_eq!(result.output.lines().count(), 1);
    }

    #[test]
    fn unreadable_config_file_is_invalid() {
        let result = run_str(
            &[
                "nmask",
                "format",
                "1",
                "--config",
                "/nonexistent/nmask-config.json",
            ],
            "",
        );
        assert_eq!(result.outcome, Outcome::Invalid);
        assert!(result.output.starts_with("nmask: invalid input: cannot read"));
    }
}
