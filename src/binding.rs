//! Typed get/set over one masked field.
//!
//! A `FieldBinding` owns the (canonical, display) pair plus the current
//! selection for a single field and only ever updates them together. Hosts
//! compose one per field.

use serde::Serialize;
use tracing::debug;

use crate::edit::caret::{Selection, clamp_selection};
use crate::edit::reconcile::{EditEvent, ReconciliationResult, reconcile};
use crate::edit::sync::sync_display;
use crate::format::display::format_display;
use crate::mask::config::{InputMode, MaskConfig};
use crate::normalize::affix::char_len;
use crate::normalize::canonical::{canonicalize, coerce_canonical, normalize_canonical};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
    /// A field the user types into.
    Editable,
    /// A read-only presentation of a value, still submitted canonically.
    DisplayOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingError {
    ReadOnly,
}

impl std::fmt::Display for BindingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindingError::ReadOnly => write!(f, "field is display-only and cannot be edited"),
        }
    }
}

impl std::error::Error for BindingError {}

#[derive(Debug, Clone)]
pub struct FieldBinding {
    config: MaskConfig,
    kind: BindingKind,
    value: String,
    display: String,
    selection: Selection,
}

impl FieldBinding {
    /// Bind an editable field holding `initial`. A canonical value is stored
    /// normalized for the mask; display text is canonicalized first.
    pub fn editable(config: MaskConfig, initial: &str) -> Self {
        let value = coerce_canonical(initial, &config);
        let display = format_display(&value, &config, false);
        let end = char_len(&display).saturating_sub(config.suffix_len());
        let selection = clamp_selection(&display, &config, end, end);
        Self {
            config,
            kind: BindingKind::Editable,
            value,
            display,
            selection,
        }
    }

    /// Bind a display-only field whose current text may already be formatted.
    pub fn display_only(config: MaskConfig, text: &str) -> Self {
        let value = normalize_canonical(&canonicalize(text, &config), &config);
        let display = format_display(&value, &config, false);
        Self {
            config,
            kind: BindingKind::DisplayOnly,
            value,
            display,
            selection: Selection::default(),
        }
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    pub fn display(&self) -> &str {
        &self.display
    }

    #[inline]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    #[inline]
    pub fn config(&self) -> &MaskConfig {
        &self.config
    }

    #[inline]
    pub fn kind(&self) -> BindingKind {
        self.kind
    }

    #[inline]
    pub fn input_mode(&self) -> InputMode {
        self.config.input_mode()
    }

    /// Programmatic value change.
    ///
    /// Editable fields normalize `value` like [`FieldBinding::editable`] and
    /// refresh the display without clobbering an in-progress decimal
    /// separator. Display-only fields accept loosely formatted input and
    /// canonicalize it first.
    pub fn set_value(&mut self, value: &str) {
        match self.kind {
            BindingKind::Editable => {
                let value = coerce_canonical(value, &self.config);
                self.display = sync_display(&self.display, &value, &self.config);
                self.value = value;
            }
            BindingKind::DisplayOnly => {
                let value = canonicalize(value, &self.config);
                self.value = normalize_canonical(&value, &self.config);
                self.display = format_display(&self.value, &self.config, false);
            }
        }
        self.selection =
            clamp_selection(&self.display, &self.config, self.selection.start, self.selection.end);
        debug!(value = %self.value, display = %self.display, "binding value set");
    }

    /// Reconcile a raw edit against the current display and commit the
    /// result as one unit.
    pub fn apply_edit(&mut self, event: &EditEvent) -> Result<ReconciliationResult, BindingError> {
        if self.kind == BindingKind::DisplayOnly {
            return Err(BindingError::ReadOnly);
        }
        let result = reconcile(&self.display, event, &self.config);
        self.value.clone_from(&result.canonical_value);
        self.display.clone_from(&result.display_value);
        self.selection = Selection::caret(result.caret_offset);
        Ok(result)
    }

    /// Host selection change (click, key-up, drag). Returns the clamped range
    /// the host should apply.
    pub fn select(&mut self, start: usize, end: usize) -> Selection {
        self.selection = clamp_selection(&self.display, &self.config, start, end);
        self.selection
    }

    /// Form submission: re-derive the canonical value from what is shown.
    pub fn commit(&mut self) -> &str {
        self.value = canonicalize(&self.display, &self.config);
        debug!(value = %self.value, "binding committed");
        &self.value
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.display.clear();
        self.selection = Selection::default();
    }
}
