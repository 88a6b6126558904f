//! Error types for palette generation and engine configuration.

use std::path::PathBuf;

use tincture_color::ColorError;

/// Result alias for palette generation.
pub type Result<T> = std::result::Result<T, PaletteError>;

/// Everything that can go wrong while generating a palette.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaletteError {
    /// A color component could not be built.
    #[error(transparent)]
    Color(#[from] ColorError),

    /// The dark/gray/light rejection loop hit its attempt cap.
    #[error(
        "could not find an acceptable color for swatch {swatch} of a {palette_type} palette \
         after {attempts} attempts"
    )]
    GenerationExhausted {
        palette_type: String,
        swatch: usize,
        attempts: u32,
    },

    /// A palette type name that is not one of the nine known shapes.
    #[error("unknown palette type '{0}'")]
    UnknownPaletteType(String),

    /// A distribution name that is not one of the known tables.
    #[error("unknown distribution '{0}'")]
    UnknownDistribution(String),

    /// A weighted-interval table that cannot be sampled.
    #[error("invalid distribution table: {0}")]
    InvalidDistribution(String),
}

impl PaletteError {
    /// Create an exhausted-generation error.
    pub fn exhausted(palette_type: impl Into<String>, swatch: usize, attempts: u32) -> Self {
        Self::GenerationExhausted {
            palette_type: palette_type.into(),
            swatch,
            attempts,
        }
    }

    /// Create an invalid-distribution error.
    pub fn invalid_distribution(reason: impl Into<String>) -> Self {
        Self::InvalidDistribution(reason.into())
    }
}

/// Errors from loading or validating an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The values parsed but are not usable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid(reason.into())
    }
}
