//! Length values as they appear in a style record.
//!
//! [§ 5 Distance Units](https://www.w3.org/TR/css-values-4/#lengths)

use serde::{Deserialize, Serialize};

use crate::math::finite;

/// A specified length.
///
/// [§ 4.4 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
///
/// "Percentage values are always relative to another quantity, for example
/// a length. [...] If that reference quantity is indefinite, the percentage
/// behaves as `auto`."
///
/// Percentages are stored as fractions: `Percent(0.5)` is 50%.
///
/// JSON form: `{"unit": "points", "value": 10.0}`, `{"unit": "auto"}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "kebab-case")]
pub enum Dimension {
    /// No value was given. Resolves like `auto`; on rect edges it means 0.
    #[default]
    Undefined,
    /// The `auto` keyword.
    Auto,
    /// An absolute length in points.
    Points(f32),
    /// A fraction of the reference length (`0.5` = 50%).
    Percent(f32),
}

impl Dimension {
    /// Resolve against a reference length.
    ///
    /// Returns `None` (indefinite) for `auto`, `undefined`, a percentage
    /// of an indefinite reference, and any non-finite result.
    #[must_use]
    pub fn resolve(self, reference: Option<f32>) -> Option<f32> {
        match self {
            Self::Points(points) => finite(points),
            Self::Percent(fraction) => reference.and_then(|r| finite(r * fraction)),
            Self::Undefined | Self::Auto => None,
        }
    }

    /// Resolve an edge (margin, padding, border) where an unresolvable
    /// value counts as zero.
    #[must_use]
    pub fn resolve_or_zero(self, reference: Option<f32>) -> f32 {
        self.resolve(reference).unwrap_or(0.0)
    }

    /// Whether this is the `auto` keyword.
    ///
    /// Only `auto` margins absorb free space; `undefined` margins are 0.
    #[must_use]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }
}
