// Human output formatting

use crate::edit::caret::Selection;
use crate::edit::reconcile::Reconciled;
use crate::normalize::affix::byte_offset;

const CARET_MARK: char = '|';

pub fn render_canonical(value: &str) -> Vec<String> {
    vec![format!("canonical: {}", quoted(value))]
}

pub fn render_display(display: &str) -> Vec<String> {
    vec![format!("display: {}", quoted(display))]
}

pub fn render_reconciled(reconciled: &Reconciled) -> Vec<String> {
    let result = &reconciled.result;
    vec![
        format!("canonical: {}", quoted(&result.canonical_value)),
        format!("display: {}", quoted(&result.display_value)),
        format!("caret: {} ({})", result.caret_offset, reconciled.shape),
        format!(
            "         {}",
            mark_selection(&result.display_value, Selection::caret(result.caret_offset))
        ),
    ]
}

pub fn render_selection(display: &str, selection: Selection) -> Vec<String> {
    vec![
        format!("selection: {}..{}", selection.start, selection.end),
        format!("           {}", mark_selection(display, selection)),
    ]
}

/// One line per replayed edit.
pub fn render_replay_step(step: u64, reconciled: &Reconciled) -> String {
    let result = &reconciled.result;
    format!(
        "#{step} {}: {} canonical={}",
        reconciled.shape,
        quoted(&mark_selection(
            &result.display_value,
            Selection::caret(result.caret_offset)
        )),
        quoted(&result.canonical_value),
    )
}

pub fn render_invalid(message: &str) -> Vec<String> {
    vec![format!("nmask: invalid input: {message}")]
}

/// Show a caret as `|` and a selection as `[...]` inside the text.
pub fn mark_selection(text: &str, selection: Selection) -> String {
    let start = byte_offset(text, selection.start);
    let end = byte_offset(text, selection.end);
    let mut out = String::with_capacity(text.len() + 2);
    out.push_str(&text[..start]);
    if selection.is_empty() {
        out.push(CARET_MARK);
    } else {
        out.push('[');
        out.push_str(&text[start..end]);
        out.push(']');
    }
    out.push_str(&text[end..]);
    out
}

fn quoted(text: &str) -> String {
    format!("\"{text}\"")
}
