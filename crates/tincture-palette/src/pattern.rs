//! Palette shapes and their hue strategies.
//!
//! Each strategy takes a base hue (degrees) and returns the full ordered
//! hue list for the palette, base first, every value in [0, 360). Only
//! [`PaletteType::Random`] ignores the base.
//!
//! Strategies that need randomness draw from an injected [`RandomSource`];
//! the weighted offsets used by complementary extras, split-complementary
//! extras and diadic come from a [`WeightedInterval`].

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use tincture_color::normalize_hue;

use crate::error::PaletteError;
use crate::random::RandomSource;
use crate::sampler::WeightedInterval;

/// Smallest and largest flexible palette.
pub const MIN_SWATCHES: usize = 2;
pub const MAX_SWATCHES: usize = 6;

/// The nine palette shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaletteType {
    /// Base and its opposite, extras clustered around the complement.
    Complementary,
    /// Three hues 120° apart (3 swatches).
    Triadic,
    /// Two complementary pairs (4 swatches).
    Tetradic,
    /// Evenly stepped neighbours of the base.
    Analogous,
    /// Base plus the two hues flanking its complement.
    SplitComplementary,
    /// Three complementary pairs (6 swatches).
    Hexadic,
    /// Base plus a weighted offset, extras alternating sides.
    Diadic,
    /// One hue with a few degrees of jitter.
    Monochromatic,
    /// Independent random hues.
    Random,
}

impl PaletteType {
    /// Human-readable name of this palette type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Complementary => "complementary",
            Self::Triadic => "triadic",
            Self::Tetradic => "tetradic",
            Self::Analogous => "analogous",
            Self::SplitComplementary => "split-complementary",
            Self::Hexadic => "hexadic",
            Self::Diadic => "diadic",
            Self::Monochromatic => "monochromatic",
            Self::Random => "random",
        }
    }

    /// Parse a palette type from its name string (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        Self::all().iter().find(|p| p.name() == lower).copied()
    }

    /// All palette types.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Complementary, Self::Triadic, Self::Tetradic,
            Self::Analogous, Self::SplitComplementary, Self::Hexadic,
            Self::Diadic, Self::Monochromatic, Self::Random,
        ]
    }

    /// Legal swatch counts. Triadic, tetradic and hexadic are fixed.
    #[must_use]
    pub const fn swatch_range(self) -> RangeInclusive<usize> {
        match self {
            Self::Triadic => 3..=3,
            Self::Tetradic => 4..=4,
            Self::Hexadic => 6..=6,
            _ => MIN_SWATCHES..=MAX_SWATCHES,
        }
    }

    /// Pull a requested swatch count into [`Self::swatch_range`].
    #[must_use]
    pub fn clamp_swatch_count(self, requested: usize) -> usize {
        let range = self.swatch_range();
        requested.clamp(*range.start(), *range.end())
    }

    /// Generate the hue list for a palette of `count` swatches.
    ///
    /// `count` is clamped first, so the result always has
    /// `clamp_swatch_count(count)` entries.
    pub fn generate_hues<R>(
        self,
        base_hue: f64,
        count: usize,
        offsets: &WeightedInterval,
        rng: &mut R,
    ) -> Vec<f64>
    where
        R: RandomSource + ?Sized,
    {
        let count = self.clamp_swatch_count(count);
        match self {
            Self::Complementary => complementary(base_hue, count, offsets, rng),
            Self::Triadic => triadic(base_hue),
            Self::Tetradic => tetradic(base_hue, rng),
            Self::Analogous => analogous(base_hue, count, rng),
            Self::SplitComplementary => split_complementary(base_hue, count, offsets, rng),
            Self::Hexadic => hexadic(base_hue, rng),
            Self::Diadic => diadic(base_hue, count, offsets, rng),
            Self::Monochromatic => monochromatic(base_hue, count, rng),
            Self::Random => random_hues(count, rng),
        }
    }
}

impl std::str::FromStr for PaletteType {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| PaletteError::UnknownPaletteType(s.to_string()))
    }
}

impl std::fmt::Display for PaletteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Strategies ──────────────────────────────────────────────────────────────

/// `[base, base+180]`; each extra swatch sits a weighted offset to either
/// side of the complement.
pub fn complementary<R>(
    base: f64,
    count: usize,
    offsets: &WeightedInterval,
    rng: &mut R,
) -> Vec<f64>
where
    R: RandomSource + ?Sized,
{
    let complement = base + 180.0;
    let mut hues = vec![normalize_hue(base), normalize_hue(complement)];
    while hues.len() < count {
        let sign = rng.sign();
        hues.push(normalize_hue(sign.mul_add(offsets.sample(rng), complement)));
    }
    hues
}

/// `[base, base+120, base+240]`.
#[must_use]
pub fn triadic(base: f64) -> Vec<f64> {
    vec![normalize_hue(base), normalize_hue(base + 120.0), normalize_hue(base + 240.0)]
}

/// `[base, base+180, base+180+d, base+d]` with `d = 90 ± U[20, 65]`.
pub fn tetradic<R: RandomSource + ?Sized>(base: f64, rng: &mut R) -> Vec<f64> {
    let sign = rng.sign();
    let d = sign.mul_add(rng.range(20.0, 65.0), 90.0);
    vec![
        normalize_hue(base),
        normalize_hue(base + 180.0),
        normalize_hue(base + 180.0 + d),
        normalize_hue(base + d),
    ]
}

/// `count` hues stepped evenly across a spread drawn from
/// `[max(20, 10 + (count-2)·12), 60]`.
pub fn analogous<R: RandomSource + ?Sized>(base: f64, count: usize, rng: &mut R) -> Vec<f64> {
    let count = count.max(1);
    let steps = (count - 1) as f64;
    let min_spread = (steps - 1.0).mul_add(12.0, 10.0).max(20.0);
    let spread = rng.range(min_spread, 60.0);
    let step = if count > 1 { spread / steps } else { 0.0 };
    (0..count)
        .map(|i| normalize_hue((i as f64).mul_add(step, base)))
        .collect()
}

/// `[base, base+180+k, base+180-k]` with `k = U[20, 30]`; extras sit a
/// weighted offset to either side of the complement.
pub fn split_complementary<R>(
    base: f64,
    count: usize,
    offsets: &WeightedInterval,
    rng: &mut R,
) -> Vec<f64>
where
    R: RandomSource + ?Sized,
{
    let complement = base + 180.0;
    let k = rng.range(20.0, 30.0);
    let mut hues = vec![
        normalize_hue(base),
        normalize_hue(complement + k),
        normalize_hue(complement - k),
    ];
    hues.truncate(count.max(1));
    while hues.len() < count {
        let sign = rng.sign();
        hues.push(normalize_hue(sign.mul_add(offsets.sample(rng), complement)));
    }
    hues
}

/// Three complementary pairs: `base`, `base±d`, each with its opposite,
/// `d = U[30, 90]`.
pub fn hexadic<R: RandomSource + ?Sized>(base: f64, rng: &mut R) -> Vec<f64> {
    let d = rng.range(30.0, 90.0);
    vec![
        normalize_hue(base),
        normalize_hue(base + 180.0),
        normalize_hue(base + d),
        normalize_hue(base + d + 180.0),
        normalize_hue(base - d),
        normalize_hue(base - d + 180.0),
    ]
}

/// `[base, base+offset]`, then extras alternating `-offset`, `+offset`
/// with a fresh weighted draw each.
pub fn diadic<R>(base: f64, count: usize, offsets: &WeightedInterval, rng: &mut R) -> Vec<f64>
where
    R: RandomSource + ?Sized,
{
    let mut hues = vec![normalize_hue(base), normalize_hue(base + offsets.sample(rng))];
    while hues.len() < count {
        let sign: f64 = if hues.len() % 2 == 0 { -1.0 } else { 1.0 };
        hues.push(normalize_hue(sign.mul_add(offsets.sample(rng), base)));
    }
    hues
}

/// Maximum hue jitter of a monochromatic swatch, in degrees.
pub const MONOCHROMATIC_JITTER: f64 = 5.0;

/// The base hue, then `count - 1` copies jittered by up to ±5°.
pub fn monochromatic<R: RandomSource + ?Sized>(base: f64, count: usize, rng: &mut R) -> Vec<f64> {
    let mut hues = vec![normalize_hue(base)];
    while hues.len() < count {
        let sign = rng.sign();
        let jitter = rng.range(0.0, MONOCHROMATIC_JITTER);
        hues.push(normalize_hue(sign.mul_add(jitter, base)));
    }
    hues
}

/// `count` independent uniform hues.
pub fn random_hues<R: RandomSource + ?Sized>(count: usize, rng: &mut R) -> Vec<f64> {
    (0..count).map(|_| normalize_hue(rng.range(0.0, 360.0))).collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{SequenceSource, Xorshift};
    use crate::sampler::DistributionType;
    use pretty_assertions::assert_eq;

    fn offsets() -> WeightedInterval {
        DistributionType::Base.default_table()
    }

    fn hue_diff(a: f64, b: f64) -> f64 {
        let d = (a - b).abs() % 360.0;
        if d > 180.0 { 360.0 - d } else { d }
    }

    fn assert_hues(got: &[f64], want: &[f64]) {
        assert_eq!(got.len(), want.len(), "{got:?} vs {want:?}");
        for (g, w) in got.iter().zip(want) {
            assert!(hue_diff(*g, *w) < 1e-9, "{got:?} vs {want:?}");
        }
    }

    #[test]
    fn names_roundtrip() {
        for &kind in PaletteType::all() {
            assert_eq!(PaletteType::from_name(kind.name()), Some(kind));
        }
        assert_eq!(
            "Split-Complementary".parse::<PaletteType>().unwrap(),
            PaletteType::SplitComplementary
        );
        assert_eq!(
            "golden".parse::<PaletteType>().unwrap_err(),
            PaletteError::UnknownPaletteType("golden".to_string())
        );
    }

    #[test]
    fn swatch_counts_clamp() {
        assert_eq!(PaletteType::Triadic.clamp_swatch_count(5), 3);
        assert_eq!(PaletteType::Tetradic.clamp_swatch_count(2), 4);
        assert_eq!(PaletteType::Hexadic.clamp_swatch_count(0), 6);
        assert_eq!(PaletteType::Analogous.clamp_swatch_count(1), 2);
        assert_eq!(PaletteType::Diadic.clamp_swatch_count(9), 6);
        assert_eq!(PaletteType::Random.clamp_swatch_count(4), 4);
    }

    #[test]
    fn every_type_yields_clamped_count_in_range() {
        let mut rng = Xorshift::new(11);
        for &kind in PaletteType::all() {
            for requested in 0..10 {
                let hues = kind.generate_hues(350.0, requested, &offsets(), &mut rng);
                assert_eq!(hues.len(), kind.clamp_swatch_count(requested), "{kind}");
                assert!(hues.iter().all(|h| (0.0..360.0).contains(h)), "{kind}: {hues:?}");
            }
        }
    }

    #[test]
    fn complementary_pair_is_exact() {
        // No randomness is consumed for two swatches.
        let mut rng = SequenceSource::new(Vec::new());
        assert_hues(&complementary(200.0, 2, &offsets(), &mut rng), &[200.0, 20.0]);
    }

    #[test]
    fn complementary_extras_cluster_around_complement() {
        // sign draw 0.9 → +, sampler draw 0.5 → 55°.
        let mut rng = SequenceSource::new([0.9, 0.5]);
        assert_hues(&complementary(0.0, 3, &offsets(), &mut rng), &[0.0, 180.0, 235.0]);
    }

    #[test]
    fn triadic_from_zero() {
        let hues = triadic(0.0);
        assert_hues(&hues[1..], &[120.0, 240.0]);
        assert_hues(&triadic(300.0), &[300.0, 60.0, 180.0]);
    }

    #[test]
    fn tetradic_offset_bounds() {
        let mut rng = Xorshift::new(5);
        for _ in 0..200 {
            let hues = tetradic(0.0, &mut rng);
            let d = hues[3];
            let offset = (d - 90.0).abs();
            assert!((20.0..=65.0).contains(&offset), "d = {d}");
            assert!(hue_diff(hues[2], normalize_hue(180.0 + d)) < 1e-9);
        }
    }

    #[test]
    fn tetradic_pinned() {
        // sign 0.0 → -, range draw 0.0 → 20 → d = 70.
        let mut rng = SequenceSource::new([0.0, 0.0]);
        assert_hues(&tetradic(10.0, &mut rng), &[10.0, 190.0, 260.0, 80.0]);
    }

    #[test]
    fn analogous_spread() {
        // 6 swatches: min spread 58, draw 0.5 → 59 → step 11.8.
        let mut rng = SequenceSource::new([0.5]);
        let hues = analogous(100.0, 6, &mut rng);
        assert_hues(&hues, &[100.0, 111.8, 123.6, 135.4, 147.2, 159.0]);

        // 2 swatches: spread drawn from [20, 60].
        let mut rng = SequenceSource::new([0.0]);
        assert_hues(&analogous(100.0, 2, &mut rng), &[100.0, 120.0]);
    }

    #[test]
    fn split_complementary_flanks_complement() {
        let mut rng = SequenceSource::new([0.5]);
        assert_hues(
            &split_complementary(0.0, 3, &offsets(), &mut rng),
            &[0.0, 205.0, 155.0],
        );
    }

    #[test]
    fn split_complementary_extras() {
        // k draw, then sign/sample pairs.
        let mut rng = SequenceSource::new([0.0, 0.1, 0.0]);
        let hues = split_complementary(0.0, 4, &offsets(), &mut rng);
        assert_hues(&hues, &[0.0, 200.0, 160.0, 140.0]);
    }

    #[test]
    fn hexadic_pairs() {
        let mut rng = SequenceSource::new([0.5]);
        assert_hues(
            &hexadic(0.0, &mut rng),
            &[0.0, 180.0, 60.0, 240.0, 300.0, 120.0],
        );
    }

    #[test]
    fn hexadic_bounds() {
        let mut rng = Xorshift::new(77);
        for _ in 0..200 {
            let hues = hexadic(40.0, &mut rng);
            let d = hue_diff(hues[2], 40.0);
            assert!((30.0..=90.0).contains(&d), "d = {d}");
            for pair in hues.chunks(2) {
                assert!((hue_diff(pair[0], pair[1]) - 180.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn diadic_alternates_sides() {
        // Sampler draws: 0.5 → 55, 0.0 → 40, 0.97 → 70.
        let mut rng = SequenceSource::new([0.5, 0.0, 0.97]);
        let hues = diadic(100.0, 4, &offsets(), &mut rng);
        assert_hues(&hues, &[100.0, 155.0, 60.0, 170.0]);
    }

    #[test]
    fn monochromatic_jitter_is_small() {
        let mut rng = Xorshift::new(3);
        let hues = monochromatic(2.0, 6, &mut rng);
        assert!((hues[0] - 2.0).abs() < 1e-12);
        for h in &hues {
            assert!(hue_diff(*h, 2.0) <= MONOCHROMATIC_JITTER, "{h}");
        }
    }

    #[test]
    fn random_ignores_base_and_is_deterministic() {
        let a = PaletteType::Random.generate_hues(0.0, 5, &offsets(), &mut Xorshift::new(8));
        let b = PaletteType::Random.generate_hues(180.0, 5, &offsets(), &mut Xorshift::new(8));
        assert_eq!(a, b);
    }

    #[test]
    fn same_seed_same_hues() {
        for &kind in PaletteType::all() {
            let a = kind.generate_hues(42.0, 6, &offsets(), &mut Xorshift::new(1234));
            let b = kind.generate_hues(42.0, 6, &offsets(), &mut Xorshift::new(1234));
            assert_eq!(a, b, "{kind}");
        }
    }
}
