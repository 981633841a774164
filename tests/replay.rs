mod helpers;

use clap::Parser;
use serde_json::Value;

use nmask::cli::args::Args;
use nmask::cli::exit::Outcome;
use nmask::orchestrator;

fn replay_args(json: bool) -> Args {
    let config = helpers::fixture_path("rupiah.json");
    let config = config.to_str().expect("utf-8 fixture path");
    let mut argv = vec!["nmask", "replay", "--config", config];
    if json {
        argv.push("--json");
    }
    Args::try_parse_from(argv).expect("args")
}

fn replay(json: bool) -> orchestrator::PipelineResult {
    let events = helpers::read_fixture("rupiah_typing.jsonl");
    let mut input = events.as_bytes();
    orchestrator::run_with_input(&replay_args(json), &mut input).expect("replay")
}

#[test]
fn human_replay_matches_golden() {
    let result = replay(false);
    assert_eq!(result.outcome, Outcome::Rendered);
    assert_eq!(
        result.output,
        helpers::read_fixture("rupiah_typing.expected")
    );
}

#[test]
fn json_replay_emits_one_document_per_event() {
    let result = replay(true);
    assert_eq!(result.outcome, Outcome::Rendered);

    let docs: Vec<Value> = result
        .output
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect();
    assert_eq!(docs.len(), 9);

    for (index, doc) in docs.iter().enumerate() {
        assert_eq!(doc["version"], "nmask.v0");
        assert_eq!(doc["operation"], "replay");
        assert_eq!(doc["outcome"], "RENDERED");
        assert_eq!(doc["step"], index as u64 + 1);
    }

    let last_number = &docs[6]["result"];
    assert_eq!(last_number["shape"], "fraction");
    assert_eq!(last_number["canonical_value"], "-1234.5");
    assert_eq!(last_number["display_value"], "Rp -1.234,5");
    assert_eq!(last_number["caret_offset"], 11);

    assert_eq!(docs[8]["result"]["display_value"], "");
}

#[test]
fn flags_override_config_file() {
    let config = helpers::fixture_path("rupiah.json");
    let args = Args::try_parse_from([
        "nmask",
        "format",
        "1234.5",
        "--config",
        config.to_str().expect("utf-8 fixture path"),
        "--prefix",
        "IDR ",
    ])
    .expect("args");
    let mut input: &[u8] = &[];
    let result = orchestrator::run_with_input(&args, &mut input).expect("format");
    assert_eq!(result.output, "display: \"IDR 1.234,5\"\n");
}
