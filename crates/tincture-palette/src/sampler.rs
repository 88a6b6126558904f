//! Weighted interval sampler: picks hue offsets from a discrete table.
//!
//! Weights are read as a cumulative distribution: draw `u` in [0, 1), walk
//! the running sum, return the first value whose cumulative weight exceeds
//! `u`. Tables whose weights sum to less than 1 fall back to the last value
//! for the leftover probability mass.

use serde::{Deserialize, Serialize};

use crate::error::{PaletteError, Result};
use crate::random::RandomSource;

/// Slack allowed on the weight sum for decimal tables like 0.1 + 0.2 + ...
const WEIGHT_SUM_SLACK: f64 = 1e-9;

/// Draw one value from a `values`/`weights` table.
///
/// Returns `None` only for an empty `values` slice. Extra entries on either
/// side are ignored when walking; the fallback is always the last value.
pub fn weighted_random_interval<R>(values: &[f64], weights: &[f64], rng: &mut R) -> Option<f64>
where
    R: RandomSource + ?Sized,
{
    let last = *values.last()?;
    let u = rng.next_f64();
    let mut cumulative = 0.0;
    for (&value, &weight) in values.iter().zip(weights) {
        cumulative += weight;
        if cumulative > u {
            return Some(value);
        }
    }
    Some(last)
}

/// A validated, non-empty weighted table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IntervalTable", into = "IntervalTable")]
pub struct WeightedInterval {
    values: Vec<f64>,
    weights: Vec<f64>,
}

/// Unvalidated serde shape of a [`WeightedInterval`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalTable {
    pub values: Vec<f64>,
    pub weights: Vec<f64>,
}

impl WeightedInterval {
    /// Validate and build a table.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidDistribution`] when the table is
    /// empty, the two lists differ in length, any entry is not finite, a
    /// weight is negative, or the weights sum to more than 1.
    pub fn new(values: Vec<f64>, weights: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(PaletteError::invalid_distribution("no values"));
        }
        if values.len() != weights.len() {
            return Err(PaletteError::invalid_distribution(format!(
                "{} values but {} weights",
                values.len(),
                weights.len()
            )));
        }
        if values.iter().chain(&weights).any(|v| !v.is_finite()) {
            return Err(PaletteError::invalid_distribution("non-finite entry"));
        }
        if weights.iter().any(|&w| w < 0.0) {
            return Err(PaletteError::invalid_distribution("negative weight"));
        }
        let sum: f64 = weights.iter().sum();
        if sum > 1.0 + WEIGHT_SUM_SLACK {
            return Err(PaletteError::invalid_distribution(format!(
                "weights sum to {sum}, more than 1"
            )));
        }
        Ok(Self { values, weights })
    }

    /// Built-in tables are known good.
    pub(crate) fn from_static(values: &[f64], weights: &[f64]) -> Self {
        Self { values: values.to_vec(), weights: weights.to_vec() }
    }

    /// Draw one value.
    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64 {
        weighted_random_interval(&self.values, &self.weights, rng).unwrap_or_default()
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl TryFrom<IntervalTable> for WeightedInterval {
    type Error = PaletteError;

    fn try_from(table: IntervalTable) -> Result<Self> {
        Self::new(table.values, table.weights)
    }
}

impl From<WeightedInterval> for IntervalTable {
    fn from(interval: WeightedInterval) -> Self {
        Self { values: interval.values, weights: interval.weights }
    }
}

// ---------------------------------------------------------------------------
// DistributionType
// ---------------------------------------------------------------------------

/// Named hue-offset tables used by complementary, split-complementary and
/// diadic palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionType {
    /// 40°–70°, peaking at 55°.
    #[default]
    Base,
    /// 20°–50°, peaking at 30°.
    Soft,
    /// 60°–90°, peaking at 75°.
    Strong,
    /// 20°–120° in even steps, uniform.
    Chaotic,
}

impl DistributionType {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Soft => "soft",
            Self::Strong => "strong",
            Self::Chaotic => "chaotic",
        }
    }

    /// Parse a distribution from its name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        Self::all().iter().find(|d| d.name() == lower).copied()
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Base, Self::Soft, Self::Strong, Self::Chaotic]
    }

    /// The built-in table for this distribution.
    #[must_use]
    pub fn default_table(self) -> WeightedInterval {
        match self {
            Self::Base => WeightedInterval::from_static(
                &[40.0, 45.0, 50.0, 55.0, 60.0, 65.0, 70.0],
                &[0.10, 0.15, 0.20, 0.30, 0.15, 0.05, 0.05],
            ),
            Self::Soft => WeightedInterval::from_static(
                &[20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0],
                &[0.10, 0.20, 0.30, 0.20, 0.10, 0.05, 0.05],
            ),
            Self::Strong => WeightedInterval::from_static(
                &[60.0, 65.0, 70.0, 75.0, 80.0, 85.0, 90.0],
                &[0.05, 0.05, 0.10, 0.30, 0.25, 0.15, 0.10],
            ),
            Self::Chaotic => WeightedInterval::from_static(
                &[20.0, 40.0, 60.0, 80.0, 100.0, 120.0],
                &[1.0 / 6.0; 6],
            ),
        }
    }
}

impl std::str::FromStr for DistributionType {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| PaletteError::UnknownDistribution(s.to_string()))
    }
}

impl std::fmt::Display for DistributionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
