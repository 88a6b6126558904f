//! Engine configuration: every injectable constant of the generator.
//!
//! Loaded from TOML; every field is optional and falls back to the
//! built-in defaults. A minimal file only names what it overrides:
//!
//! ```toml
//! max_attempts = 5000
//!
//! [thresholds]
//! gray = 30
//!
//! [shifts.monochromatic]
//! saturation = 10
//! lightness = 30
//!
//! [distributions.soft]
//! values = [10, 20, 30]
//! weights = [0.2, 0.5, 0.3]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constraint::Thresholds;
use crate::error::ConfigError;
use crate::pattern::PaletteType;
use crate::sampler::{DistributionType, WeightedInterval};

/// Default cap on candidates tried per swatch.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

// ---------------------------------------------------------------------------
// Shift ranges
// ---------------------------------------------------------------------------

/// Maximum saturation/lightness drift of a swatch away from the base color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShiftRange {
    pub saturation: f64,
    pub lightness: f64,
}

impl ShiftRange {
    #[must_use]
    pub const fn new(saturation: f64, lightness: f64) -> Self {
        Self { saturation, lightness }
    }
}

/// One [`ShiftRange`] per palette type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftTable {
    pub complementary: ShiftRange,
    pub triadic: ShiftRange,
    pub tetradic: ShiftRange,
    pub analogous: ShiftRange,
    pub split_complementary: ShiftRange,
    pub hexadic: ShiftRange,
    pub diadic: ShiftRange,
    pub monochromatic: ShiftRange,
    pub random: ShiftRange,
}

impl Default for ShiftTable {
    fn default() -> Self {
        Self {
            complementary: ShiftRange::new(10.0, 15.0),
            triadic: ShiftRange::new(10.0, 10.0),
            tetradic: ShiftRange::new(12.0, 12.0),
            analogous: ShiftRange::new(8.0, 12.0),
            split_complementary: ShiftRange::new(10.0, 12.0),
            hexadic: ShiftRange::new(15.0, 15.0),
            diadic: ShiftRange::new(10.0, 10.0),
            monochromatic: ShiftRange::new(20.0, 25.0),
            random: ShiftRange::new(0.0, 0.0),
        }
    }
}

impl ShiftTable {
    #[must_use]
    pub const fn get(&self, kind: PaletteType) -> ShiftRange {
        match kind {
            PaletteType::Complementary => self.complementary,
            PaletteType::Triadic => self.triadic,
            PaletteType::Tetradic => self.tetradic,
            PaletteType::Analogous => self.analogous,
            PaletteType::SplitComplementary => self.split_complementary,
            PaletteType::Hexadic => self.hexadic,
            PaletteType::Diadic => self.diadic,
            PaletteType::Monochromatic => self.monochromatic,
            PaletteType::Random => self.random,
        }
    }
}

// ---------------------------------------------------------------------------
// Alpha range & distributions
// ---------------------------------------------------------------------------

/// Interval an alpha channel is drawn from when alpha is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphaRange {
    pub min: f64,
    pub max: f64,
}

impl Default for AlphaRange {
    fn default() -> Self {
        Self { min: 0.5, max: 1.0 }
    }
}

/// The hue-offset table for each [`DistributionType`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionTables {
    pub base: WeightedInterval,
    pub soft: WeightedInterval,
    pub strong: WeightedInterval,
    pub chaotic: WeightedInterval,
}

impl Default for DistributionTables {
    fn default() -> Self {
        Self {
            base: DistributionType::Base.default_table(),
            soft: DistributionType::Soft.default_table(),
            strong: DistributionType::Strong.default_table(),
            chaotic: DistributionType::Chaotic.default_table(),
        }
    }
}

impl DistributionTables {
    #[must_use]
    pub const fn get(&self, kind: DistributionType) -> &WeightedInterval {
        match kind {
            DistributionType::Base => &self.base,
            DistributionType::Soft => &self.soft,
            DistributionType::Strong => &self.strong,
            DistributionType::Chaotic => &self.chaotic,
        }
    }
}

// ---------------------------------------------------------------------------
// EngineConfig
// ---------------------------------------------------------------------------

/// All tunable constants of the palette engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub max_attempts: u32,
    pub thresholds: Thresholds,
    pub shifts: ShiftTable,
    pub alpha_range: AlphaRange,
    pub distributions: DistributionTables,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            thresholds: Thresholds::default(),
            shifts: ShiftTable::default(),
            alpha_range: AlphaRange::default(),
            distributions: DistributionTables::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML or malformed distribution
    /// tables, [`ConfigError::Invalid`] for values that fail [`Self::validate`].
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), max_attempts = config.max_attempts, "loaded engine config");
        Ok(config)
    }

    /// Check every value is usable by the generator.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        for (name, value) in [("dark", t.dark), ("gray", t.gray), ("light", t.light)] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::invalid(format!(
                    "thresholds.{name} = {value} is outside [0, 100]"
                )));
            }
        }
        if t.dark > t.light {
            return Err(ConfigError::invalid(format!(
                "thresholds.dark ({}) is above thresholds.light ({})",
                t.dark, t.light
            )));
        }

        for &kind in PaletteType::all() {
            let shift = self.shifts.get(kind);
            let axes = [("saturation", shift.saturation), ("lightness", shift.lightness)];
            for (axis, value) in axes {
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfigError::invalid(format!(
                        "shifts.{}.{axis} = {value} must be a non-negative number",
                        kind.name().replace('-', "_")
                    )));
                }
            }
        }

        if self.max_attempts == 0 {
            return Err(ConfigError::invalid("max_attempts must be at least 1"));
        }

        let a = self.alpha_range;
        let in_unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        if !in_unit(a.min) || !in_unit(a.max) || a.min > a.max {
            return Err(ConfigError::invalid(format!(
                "alpha_range [{}, {}] must be an ordered interval inside [0, 1]",
                a.min, a.max
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn defaults_are_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_override() {
        let config = EngineConfig::from_toml_str(
            r"
            max_attempts = 5000

            [thresholds]
            gray = 30

            [shifts.split_complementary]
            saturation = 4
            lightness = 6

            [distributions.soft]
            values = [10, 20, 30]
            weights = [0.2, 0.5, 0.3]
            ",
        )
        .unwrap();
        assert_eq!(config.max_attempts, 5000);
        assert!((config.thresholds.gray - 30.0).abs() < f64::EPSILON);
        assert!((config.thresholds.dark - 25.0).abs() < f64::EPSILON);
        assert_eq!(
            config.shifts.get(PaletteType::SplitComplementary),
            ShiftRange::new(4.0, 6.0)
        );
        assert_eq!(config.shifts.triadic, ShiftTable::default().triadic);
        assert_eq!(config.distributions.get(DistributionType::Soft).values(), &[10.0, 20.0, 30.0]);
        assert_eq!(
            config.distributions.get(DistributionType::Base),
            &DistributionType::Base.default_table()
        );
    }

    #[test]
    fn malformed_table_is_a_parse_error() {
        let err = EngineConfig::from_toml_str(
            "[distributions.base]\nvalues = [1, 2]\nweights = [0.9, 0.9]\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "{err}");
    }

    #[test]
    fn invalid_values_are_rejected() {
        for doc in [
            "max_attempts = 0",
            "[thresholds]\ndark = 120",
            "[thresholds]\ndark = 80\nlight = 60",
            "[shifts.hexadic]\nsaturation = -1\nlightness = 5",
            "[alpha_range]\nmin = 0.9\nmax = 0.1",
        ] {
            let err = EngineConfig::from_toml_str(doc).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{doc}: {err}");
        }
    }

    #[test]
    fn invalid_message_names_field() {
        let err = EngineConfig::from_toml_str(
            "[shifts.split_complementary]\nsaturation = -2\nlightness = 1",
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid config: shifts.split_complementary.saturation = -2 must be a non-negative number"
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = EngineConfig::load("/nonexistent/tincture/engine.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn serializes_back_to_toml() {
        let text = toml::to_string(&EngineConfig::default()).unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), EngineConfig::default());
    }
}
