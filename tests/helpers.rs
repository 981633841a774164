#![allow(dead_code)]

use std::path::{Path, PathBuf};

use nmask::{EditEvent, FieldBinding, ReconciliationResult};

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("fixture should be readable")
}

/// Insert `typed` at the binding's caret, one character per keystroke, the
/// way a browser hands the raw text over after each key.
pub fn type_text(binding: &mut FieldBinding, typed: &str) -> ReconciliationResult {
    let mut last = ReconciliationResult::default();
    for c in typed.chars() {
        let caret = binding.selection().start;
        let mut raw: String = binding.display().chars().take(caret).collect();
        raw.push(c);
        raw.extend(binding.display().chars().skip(caret));
        last = binding
            .apply_edit(&EditEvent::new(raw, caret + 1))
            .expect("editable binding");
    }
    last
}

/// Delete the character before the caret.
pub fn backspace(binding: &mut FieldBinding) -> ReconciliationResult {
    let caret = binding.selection().start;
    let raw: String = binding
        .display()
        .chars()
        .enumerate()
        .filter(|(index, _)| *index + 1 != caret)
        .map(|(_, c)| c)
        .collect();
    binding
        .apply_edit(&EditEvent::new(raw, caret.saturating_sub(1)))
        .expect("editable binding")
}
