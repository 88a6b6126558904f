//! # tincture-palette: Constrained color palette generation
//!
//! Generates palettes of 2–6 swatches from a base color and one of nine
//! geometric shapes on the color wheel, rejecting swatches that come out
//! too dark, too gray, or too light.
//!
//! # Architecture
//!
//! ```text
//! SelectedPaletteOptions + EngineConfig + RandomSource
//!     │
//!     ▼
//! pattern.rs:    hue list for the palette type (sampler.rs for offsets)
//!     │
//!     ▼
//! palette.rs:    jitter saturation/lightness per swatch
//!     │
//!     ▼
//! constraint.rs: reject too dark / too gray / too light, retry
//!     │
//!     ▼
//! palette.rs:    snap to RGB, expand into nine spaces + CSS text
//! ```
//!
//! # Randomness
//!
//! Nothing here touches a global generator. Every draw goes through the
//! [`RandomSource`] passed in, so a seeded [`Xorshift`] or
//! [`RandSource`]-wrapped `StdRng` reproduces a palette exactly.

// Swatch indices and step counts are small integer-to-float casts.
#![allow(clippy::cast_precision_loss)]
// Hue/saturation/lightness variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod config;
pub mod constraint;
pub mod error;
pub mod palette;
pub mod pattern;
pub mod random;
pub mod sampler;

pub use config::{AlphaRange, DistributionTables, EngineConfig, ShiftRange, ShiftTable};
pub use constraint::{LimitFlags, Thresholds};
pub use error::{ConfigError, PaletteError, Result};
pub use palette::{
    ItemColors, ItemCss, Palette, PaletteGenerator, PaletteItem, PaletteMetadata,
    SelectedPaletteOptions, generate_palette, random_base_color,
};
pub use pattern::PaletteType;
pub use random::{RandSource, RandomSource, SequenceSource, Xorshift};
pub use sampler::{DistributionType, WeightedInterval, weighted_random_interval};
