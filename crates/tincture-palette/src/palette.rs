//! Palette assembly: the bridge from hue lists to finished swatches.
//!
//! Takes a hue list from [`pattern`](crate::pattern), jitters saturation and
//! lightness per swatch, rejects candidates that violate the enabled
//! [`LimitFlags`], and expands every accepted color into all nine color
//! spaces plus their CSS text.
//!
//! Accepted candidates are snapped to 8-bit RGB before anything else is
//! derived, and the constraints are checked on the snapped color. Every
//! representation of an item therefore converts back to the item's HSL,
//! and the hex/RGB channels are whole bytes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use tincture_color::{
    Alpha, Cmyk, ColorSpace, ColorValue, Hex, Hsl, Hsv, Lab, Rgb, Sl, Sv, Xyz, normalize_hue,
};

use crate::config::{EngineConfig, ShiftRange};
use crate::constraint::LimitFlags;
use crate::error::{PaletteError, Result};
use crate::pattern::PaletteType;
use crate::random::RandomSource;
use crate::sampler::DistributionType;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// What the caller asked for. Treated as untrusted: the swatch count is
/// clamped to the legal range for the palette type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectedPaletteOptions {
    pub palette_type: PaletteType,
    pub swatch_count: usize,
    pub limit_dark: bool,
    pub limit_gray: bool,
    pub limit_light: bool,
    pub distribution: DistributionType,
    /// Base color in any space. A random base is drawn when absent.
    pub custom_base_color: Option<ColorValue>,
    pub enable_alpha: bool,
}

impl Default for SelectedPaletteOptions {
    fn default() -> Self {
        Self {
            palette_type: PaletteType::Complementary,
            swatch_count: 5,
            limit_dark: false,
            limit_gray: false,
            limit_light: false,
            distribution: DistributionType::Base,
            custom_base_color: None,
            enable_alpha: false,
        }
    }
}

impl SelectedPaletteOptions {
    #[must_use]
    pub fn new(palette_type: PaletteType, swatch_count: usize) -> Self {
        Self { palette_type, swatch_count, ..Self::default() }
    }

    /// The three limit toggles as flags.
    #[must_use]
    pub fn limits(&self) -> LimitFlags {
        LimitFlags::from_bools(self.limit_dark, self.limit_gray, self.limit_light)
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// One color in all nine spaces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemColors {
    pub cmyk: Cmyk,
    pub hex: Hex,
    pub hsl: Hsl,
    pub hsv: Hsv,
    pub lab: Lab,
    pub rgb: Rgb,
    pub sl: Sl,
    pub sv: Sv,
    pub xyz: Xyz,
}

impl ItemColors {
    /// Expand an 8-bit color into every space.
    ///
    /// # Errors
    ///
    /// Propagates conversion errors (none occur for valid input).
    pub fn from_rgb(rgb: Rgb) -> Result<Self> {
        let value = ColorValue::from(rgb);
        Ok(Self {
            cmyk: value.to_cmyk()?,
            hex: value.to_hex()?,
            hsl: value.to_hsl()?,
            hsv: value.to_hsv()?,
            lab: value.to_lab()?,
            rgb,
            sl: value.to_sl()?,
            sv: value.to_sv()?,
            xyz: value.to_xyz()?,
        })
    }

    /// The representation in `space`.
    #[must_use]
    pub fn get(&self, space: ColorSpace) -> ColorValue {
        match space {
            ColorSpace::Cmyk => self.cmyk.into(),
            ColorSpace::Hex => self.hex.into(),
            ColorSpace::Hsl => self.hsl.into(),
            ColorSpace::Hsv => self.hsv.into(),
            ColorSpace::Lab => self.lab.into(),
            ColorSpace::Rgb => self.rgb.into(),
            ColorSpace::Sl => self.sl.into(),
            ColorSpace::Sv => self.sv.into(),
            ColorSpace::Xyz => self.xyz.into(),
        }
    }
}

/// CSS text for each representation of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCss {
    pub cmyk: String,
    pub hex: String,
    pub hsl: String,
    pub hsv: String,
    pub lab: String,
    pub rgb: String,
    pub sl: String,
    pub sv: String,
    pub xyz: String,
}

impl ItemCss {
    #[must_use]
    pub fn get(&self, space: ColorSpace) -> &str {
        match space {
            ColorSpace::Cmyk => &self.cmyk,
            ColorSpace::Hex => &self.hex,
            ColorSpace::Hsl => &self.hsl,
            ColorSpace::Hsv => &self.hsv,
            ColorSpace::Lab => &self.lab,
            ColorSpace::Rgb => &self.rgb,
            ColorSpace::Sl => &self.sl,
            ColorSpace::Sv => &self.sv,
            ColorSpace::Xyz => &self.xyz,
        }
    }
}

impl From<&ItemColors> for ItemCss {
    fn from(c: &ItemColors) -> Self {
        Self {
            cmyk: c.cmyk.to_string(),
            hex: c.hex.to_string(),
            hsl: c.hsl.to_string(),
            hsv: c.hsv.to_string(),
            lab: c.lab.to_string(),
            rgb: c.rgb.to_string(),
            sl: c.sl.to_string(),
            sv: c.sv.to_string(),
            xyz: c.xyz.to_string(),
        }
    }
}

/// One generated swatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteItem {
    /// 1-based position in the palette.
    pub item_id: u32,
    pub colors: ItemColors,
    pub css: ItemCss,
}

impl PaletteItem {
    /// Build an item from its 8-bit color (alpha included).
    ///
    /// # Errors
    ///
    /// Propagates conversion errors (none occur for valid input).
    pub fn from_rgb(item_id: u32, rgb: Rgb) -> Result<Self> {
        let colors = ItemColors::from_rgb(rgb)?;
        let css = ItemCss::from(&colors);
        Ok(Self { item_id, colors, css })
    }

    /// The canonical HSL value every representation round-trips to.
    #[must_use]
    pub const fn hsl(&self) -> Hsl {
        self.colors.hsl
    }
}

/// What produced a palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteMetadata {
    pub palette_type: PaletteType,
    pub swatches: usize,
    pub limits: LimitFlags,
    pub distribution: DistributionType,
    pub enable_alpha: bool,
    pub timestamp: DateTime<Utc>,
    /// The base color the hue list was derived from.
    pub base_color: Hsl,
}

/// A finished palette. Plain data: callers own it outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub id: String,
    pub items: Vec<PaletteItem>,
    pub metadata: PaletteMetadata,
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Draw a random base color whose saturation and lightness already sit
/// inside the windows allowed by `limits`.
///
/// # Errors
///
/// Only if the configured thresholds are outside [0, 100]; a validated
/// [`EngineConfig`] never is.
pub fn random_base_color<R>(
    config: &EngineConfig,
    limits: LimitFlags,
    rng: &mut R,
) -> Result<Hsl>
where
    R: RandomSource + ?Sized,
{
    let hue = normalize_hue(rng.range(0.0, 360.0));
    let (s, l) = fresh_saturation_lightness(config, limits, rng);
    Ok(Hsl::new(hue, s, l)?)
}

fn fresh_saturation_lightness<R>(
    config: &EngineConfig,
    limits: LimitFlags,
    rng: &mut R,
) -> (f64, f64)
where
    R: RandomSource + ?Sized,
{
    let (s_lo, s_hi) = config.thresholds.saturation_window(limits);
    let (l_lo, l_hi) = config.thresholds.lightness_window(limits);
    (rng.range(s_lo, s_hi), rng.range(l_lo, l_hi))
}

fn jitter<R>(base: &Hsl, shift: ShiftRange, rng: &mut R) -> (f64, f64)
where
    R: RandomSource + ?Sized,
{
    let s_sign = rng.sign();
    let s = s_sign.mul_add(rng.range(0.0, shift.saturation), base.saturation.get());
    let l_sign = rng.sign();
    let l = l_sign.mul_add(rng.range(0.0, shift.lightness), base.lightness.get());
    (s.clamp(0.0, 100.0), l.clamp(0.0, 100.0))
}

/// Palette assembler bound to one configuration.
#[derive(Debug, Clone, Copy)]
pub struct PaletteGenerator<'a> {
    config: &'a EngineConfig,
}

impl<'a> PaletteGenerator<'a> {
    #[must_use]
    pub const fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Generate a palette.
    ///
    /// `id` and `timestamp` are supplied by the caller so generation stays
    /// free of clocks and counters.
    ///
    /// # Errors
    ///
    /// [`PaletteError::GenerationExhausted`] when a swatch finds no
    /// acceptable color within `max_attempts` candidates.
    pub fn generate<R>(
        &self,
        options: &SelectedPaletteOptions,
        id: impl Into<String>,
        timestamp: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Palette>
    where
        R: RandomSource + ?Sized,
    {
        let config = self.config;
        let kind = options.palette_type;
        let count = kind.clamp_swatch_count(options.swatch_count);
        if count != options.swatch_count {
            warn!(
                palette_type = %kind,
                requested = options.swatch_count,
                count,
                "swatch count clamped to the legal range"
            );
        }

        let limits = options.limits();
        let base = match &options.custom_base_color {
            Some(color) => color.to_hsl()?,
            None => random_base_color(config, limits, rng)?,
        };
        let offsets = config.distributions.get(options.distribution);
        let hues = kind.generate_hues(base.hue.get(), count, offsets, rng);
        let shift = config.shifts.get(kind);
        // First half of the attempts stay near the base; the rest sample
        // the whole allowed window.
        let jitter_attempts = config.max_attempts / 2;

        let mut items = Vec::with_capacity(hues.len());
        let mut total_attempts: u64 = 0;
        for (item_id, &hue) in (1u32..).zip(&hues) {
            let mut accepted = None;
            for attempt in 1..=config.max_attempts {
                total_attempts += 1;
                let (s, l) = if kind == PaletteType::Random {
                    fresh_saturation_lightness(config, limits, rng)
                } else if item_id == 1 && attempt == 1 {
                    (base.saturation.get(), base.lightness.get())
                } else if attempt <= jitter_attempts {
                    jitter(&base, shift, rng)
                } else {
                    // A base outside the limits may sit further from the
                    // window than the shift reaches.
                    fresh_saturation_lightness(config, limits, rng)
                };

                let rgb = ColorValue::from(Hsl::new(hue, s, l)?).to_rgb()?;
                let snapped = ColorValue::from(rgb).to_hsl()?;
                if config.thresholds.rejects(&snapped, limits) {
                    trace!(
                        palette_type = %kind,
                        swatch = item_id,
                        attempt,
                        saturation = snapped.saturation.get(),
                        lightness = snapped.lightness.get(),
                        "rejected candidate"
                    );
                    continue;
                }
                accepted = Some(rgb);
                break;
            }
            let rgb = accepted.ok_or_else(|| {
                PaletteError::exhausted(kind.name(), item_id as usize, config.max_attempts)
            })?;

            let alpha = if options.enable_alpha {
                let range = config.alpha_range;
                Some(Alpha::new(rng.range(range.min, range.max))?)
            } else {
                None
            };
            items.push(PaletteItem::from_rgb(item_id, rgb.with_alpha(alpha))?);
        }

        let id = id.into();
        debug!(
            id = %id,
            palette_type = %kind,
            swatches = items.len(),
            attempts = total_attempts,
            "assembled palette"
        );

        Ok(Palette {
            id,
            items,
            metadata: PaletteMetadata {
                palette_type: kind,
                swatches: count,
                limits,
                distribution: options.distribution,
                enable_alpha: options.enable_alpha,
                timestamp,
                base_color: base,
            },
        })
    }
}

/// Generate a palette with the default [`EngineConfig`].
///
/// # Errors
///
/// See [`PaletteGenerator::generate`].
pub fn generate_palette<R>(
    options: &SelectedPaletteOptions,
    id: impl Into<String>,
    timestamp: DateTime<Utc>,
    rng: &mut R,
) -> Result<Palette>
where
    R: RandomSource + ?Sized,
{
    let config = EngineConfig::default();
    PaletteGenerator::new(&config).generate(options, id, timestamp, rng)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Thresholds;
    use crate::random::{SequenceSource, Xorshift};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn with_base(
        kind: PaletteType,
        count: usize,
        h: f64,
        s: f64,
        l: f64,
    ) -> SelectedPaletteOptions {
        SelectedPaletteOptions {
            custom_base_color: Some(Hsl::new(h, s, l).unwrap().into()),
            ..SelectedPaletteOptions::new(kind, count)
        }
    }

    #[test]
    fn ids_are_sequential_from_one() {
        let opts = with_base(PaletteType::Analogous, 5, 30.0, 60.0, 50.0);
        let p = generate_palette(&opts, "p1", ts(), &mut Xorshift::new(1)).unwrap();
        let ids: Vec<u32> = p.items.iter().map(|i| i.item_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(p.id, "p1");
        assert_eq!(p.metadata.timestamp, ts());
    }

    #[test]
    fn first_swatch_is_the_base_color() {
        let opts = with_base(PaletteType::Complementary, 2, 200.0, 50.0, 50.0);
        let p = generate_palette(&opts, "p", ts(), &mut Xorshift::new(9)).unwrap();
        let expected = ColorValue::from(Hsl::new(200.0, 50.0, 50.0).unwrap()).to_rgb().unwrap();
        assert_eq!(p.items[0].colors.rgb, expected);
    }

    #[test]
    fn complementary_pair_hues() {
        let opts = with_base(PaletteType::Complementary, 2, 200.0, 50.0, 50.0);
        let p = generate_palette(&opts, "p", ts(), &mut Xorshift::new(2)).unwrap();
        let h0 = p.items[0].hsl().hue.get();
        let h1 = p.items[1].hsl().hue.get();
        // Hues survive 8-bit snapping to within a degree.
        assert!((h0 - 200.0).abs() < 1.0, "{h0}");
        assert!((h1 - 20.0).abs() < 1.0, "{h1}");
    }

    #[test]
    fn css_matches_colors() {
        let opts = with_base(PaletteType::Triadic, 3, 10.0, 70.0, 40.0);
        let p = generate_palette(&opts, "p", ts(), &mut Xorshift::new(4)).unwrap();
        for item in &p.items {
            for &space in ColorSpace::all() {
                assert_eq!(item.css.get(space), item.colors.get(space).to_string());
            }
        }
    }

    #[test]
    fn exhaustion_is_reported() {
        // 8-bit lightness is always k/510 * 100, so no snapped color lands
        // on exactly 50.1%.
        let config = EngineConfig {
            max_attempts: 50,
            thresholds: Thresholds { dark: 50.1, gray: 20.0, light: 50.1 },
            ..EngineConfig::default()
        };
        let opts = SelectedPaletteOptions {
            limit_dark: true,
            limit_light: true,
            ..with_base(PaletteType::Complementary, 3, 120.0, 60.0, 50.1)
        };
        let err = PaletteGenerator::new(&config)
            .generate(&opts, "p", ts(), &mut Xorshift::new(5))
            .unwrap_err();
        assert_eq!(err, PaletteError::exhausted("complementary", 1, 50));
    }

    #[test]
    fn dark_custom_base_still_converges() {
        // Lightness 12 is 13 points below the dark threshold while the
        // triadic shift reaches only 10.
        let opts = SelectedPaletteOptions {
            limit_dark: true,
            ..with_base(PaletteType::Triadic, 3, 210.0, 60.0, 12.0)
        };
        let config = EngineConfig::default();
        for seed in 1..20 {
            let p = generate_palette(&opts, "p", ts(), &mut Xorshift::new(seed)).unwrap();
            assert_eq!(p.items.len(), 3);
            for item in &p.items {
                assert!(!config.thresholds.is_too_dark(&item.hsl()), "{}", item.css.hsl);
            }
        }
    }

    #[test]
    fn alpha_is_drawn_from_range() {
        let opts = SelectedPaletteOptions {
            enable_alpha: true,
            ..with_base(PaletteType::Hexadic, 6, 90.0, 60.0, 50.0)
        };
        let p = generate_palette(&opts, "p", ts(), &mut Xorshift::new(6)).unwrap();
        for item in &p.items {
            let a = item.colors.rgb.alpha.unwrap().get();
            assert!((0.5..=1.0).contains(&a), "{a}");
            assert_eq!(item.colors.lab.alpha, item.colors.rgb.alpha);
            assert!(item.css.rgb.starts_with("rgba("));
            assert_eq!(item.css.hex.len(), 9);
        }
        assert!(p.metadata.enable_alpha);
    }

    #[test]
    fn no_alpha_by_default() {
        let opts = with_base(PaletteType::Diadic, 4, 90.0, 60.0, 50.0);
        let p = generate_palette(&opts, "p", ts(), &mut Xorshift::new(6)).unwrap();
        assert!(p.items.iter().all(|i| i.colors.hsl.alpha.is_none()));
    }

    #[test]
    fn random_base_honors_limits() {
        let config = EngineConfig::default();
        let mut rng = Xorshift::new(21);
        for _ in 0..500 {
            let hsl = random_base_color(&config, LimitFlags::all(), &mut rng).unwrap();
            assert!(!config.thresholds.is_out_of_bounds(&hsl), "{hsl}");
        }
    }

    #[test]
    fn random_base_pinned() {
        let config = EngineConfig::default();
        let mut rng = SequenceSource::new([0.5, 0.5, 0.5]);
        let hsl = random_base_color(&config, LimitFlags::all(), &mut rng).unwrap();
        assert!((hsl.hue.get() - 180.0).abs() < 1e-9);
        assert!((hsl.saturation.get() - 60.0).abs() < 1e-9);
        assert!((hsl.lightness.get() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn base_from_any_space() {
        let opts = SelectedPaletteOptions {
            custom_base_color: Some(Hex::parse("#3366cc").unwrap().into()),
            ..SelectedPaletteOptions::new(PaletteType::Monochromatic, 3)
        };
        let p = generate_palette(&opts, "p", ts(), &mut Xorshift::new(8)).unwrap();
        assert_eq!(p.items[0].colors.hex.to_string(), "#3366cc");
    }

    #[test]
    fn metadata_records_request() {
        let opts = SelectedPaletteOptions {
            limit_dark: true,
            limit_light: true,
            distribution: DistributionType::Strong,
            ..SelectedPaletteOptions::new(PaletteType::SplitComplementary, 12)
        };
        let p = generate_palette(&opts, "p", ts(), &mut Xorshift::new(10)).unwrap();
        assert_eq!(p.metadata.palette_type, PaletteType::SplitComplementary);
        assert_eq!(p.metadata.swatches, 6);
        assert_eq!(p.items.len(), 6);
        assert_eq!(p.metadata.limits, LimitFlags::DARK | LimitFlags::LIGHT);
        assert_eq!(p.metadata.distribution, DistributionType::Strong);
    }
}
