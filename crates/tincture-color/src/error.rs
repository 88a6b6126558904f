// SPDX-License-Identifier: MIT
//
// Error types for the color model.

use crate::unit::{Bounds, UnitKey};

/// Result alias for color construction and conversion.
pub type Result<T> = std::result::Result<T, ColorError>;

/// Everything that can go wrong while building or converting a color.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    /// A branded unit constructor received a value outside its legal bounds.
    #[error("{unit} value {value} is out of range {bounds}")]
    OutOfRange {
        unit: UnitKey,
        value: f64,
        bounds: Bounds,
    },

    /// A string that is not `#` followed by six hex digits (plus optional alpha).
    #[error("invalid hex color '{0}'")]
    InvalidHex(String),

    /// A format tag that does not name any known color space.
    #[error("unsupported color format '{0}'")]
    UnsupportedFormat(String),
}

impl ColorError {
    /// Create an out-of-range error for `unit`.
    #[must_use]
    pub const fn out_of_range(unit: UnitKey, value: f64) -> Self {
        Self::OutOfRange {
            unit,
            value,
            bounds: unit.bounds(),
        }
    }

    /// Create an invalid-hex error.
    pub fn invalid_hex(value: impl Into<String>) -> Self {
        Self::InvalidHex(value.into())
    }

    /// Create an unsupported-format error.
    pub fn unsupported_format(tag: impl Into<String>) -> Self {
        Self::UnsupportedFormat(tag.into())
    }
}
