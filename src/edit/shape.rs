//! Shape of a single edit, as decided by the reconciler.

use serde::Serialize;

/// Which branch of reconciliation produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditShape {
    /// Nothing left, or only the literal prefix/suffix.
    Empty,
    /// Non-empty text with no numeric content at all.
    Residue,
    /// A lone minus sign, typed before any digit.
    SignOnly,
    /// The caret follows a decimal separator with nothing typed after it yet.
    DecimalTyped,
    /// The caret ends up directly after an existing decimal separator.
    DecimalAdjacent,
    /// The caret is inside the fraction.
    Fraction,
    /// The caret is inside the integer part.
    Integer,
}

impl EditShape {
    pub const ALL: [EditShape; 7] = [
        EditShape::Empty,
        EditShape::Residue,
        EditShape::SignOnly,
        EditShape::DecimalTyped,
        EditShape::DecimalAdjacent,
        EditShape::Fraction,
        EditShape::Integer,
    ];

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            EditShape::Empty => "empty",
            EditShape::Residue => "residue",
            EditShape::SignOnly => "sign_only",
            EditShape::DecimalTyped => "decimal_typed",
            EditShape::DecimalAdjacent => "decimal_adjacent",
            EditShape::Fraction => "fraction",
            EditShape::Integer => "integer",
        }
    }

    /// Shapes that clear both the canonical value and the display.
    #[inline]
    pub const fn clears_field(self) -> bool {
        matches!(self, EditShape::Empty | EditShape::Residue)
    }
}

impl std::fmt::Display for EditShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
