//! Perceptual constraints: reject colors that are too dark, too gray, or
//! too light.
//!
//! The predicates run inside the assembler's retry loop, so they never
//! fail: anything that is not a finite percentage is simply "not
//! acceptable".
//!
//! - too dark:  lightness  < `dark`   (default 25)
//! - too gray:  saturation < `gray`   (default 20)
//! - too light: lightness  > `light`  (default 75)

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use tincture_color::Hsl;

bitflags! {
    /// Which constraints the assembler enforces.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct LimitFlags: u8 {
        const DARK  = 0b001;
        const GRAY  = 0b010;
        const LIGHT = 0b100;
    }
}

impl LimitFlags {
    #[must_use]
    pub fn from_bools(dark: bool, gray: bool, light: bool) -> Self {
        let mut flags = Self::empty();
        flags.set(Self::DARK, dark);
        flags.set(Self::GRAY, gray);
        flags.set(Self::LIGHT, light);
        flags
    }
}

/// Constraint thresholds, all on the percent scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub dark: f64,
    pub gray: f64,
    pub light: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { dark: 25.0, gray: 20.0, light: 75.0 }
    }
}

fn is_percent(v: f64) -> bool {
    v.is_finite() && (0.0..=100.0).contains(&v)
}

impl Thresholds {
    // ── Raw predicates ──────────────────────────────────────────────

    #[must_use]
    pub fn lightness_too_dark(&self, lightness: f64) -> bool {
        !is_percent(lightness) || lightness < self.dark
    }

    #[must_use]
    pub fn saturation_too_gray(&self, saturation: f64) -> bool {
        !is_percent(saturation) || saturation < self.gray
    }

    #[must_use]
    pub fn lightness_too_light(&self, lightness: f64) -> bool {
        !is_percent(lightness) || lightness > self.light
    }

    // ── HSL predicates ──────────────────────────────────────────────

    #[must_use]
    pub fn is_too_dark(&self, hsl: &Hsl) -> bool {
        self.lightness_too_dark(hsl.lightness.get())
    }

    #[must_use]
    pub fn is_too_gray(&self, hsl: &Hsl) -> bool {
        self.saturation_too_gray(hsl.saturation.get())
    }

    #[must_use]
    pub fn is_too_light(&self, hsl: &Hsl) -> bool {
        self.lightness_too_light(hsl.lightness.get())
    }

    /// Too dark, too gray, or too light.
    #[must_use]
    pub fn is_out_of_bounds(&self, hsl: &Hsl) -> bool {
        self.is_too_dark(hsl) || self.is_too_gray(hsl) || self.is_too_light(hsl)
    }

    /// Whether any constraint enabled in `limits` rejects raw `s`/`l`.
    #[must_use]
    pub fn rejects_raw(&self, saturation: f64, lightness: f64, limits: LimitFlags) -> bool {
        (limits.contains(LimitFlags::DARK) && self.lightness_too_dark(lightness))
            || (limits.contains(LimitFlags::GRAY) && self.saturation_too_gray(saturation))
            || (limits.contains(LimitFlags::LIGHT) && self.lightness_too_light(lightness))
    }

    /// Whether any constraint enabled in `limits` rejects `hsl`.
    #[must_use]
    pub fn rejects(&self, hsl: &Hsl, limits: LimitFlags) -> bool {
        self.rejects_raw(hsl.saturation.get(), hsl.lightness.get(), limits)
    }

    /// Lightness interval a color may occupy under `limits`.
    #[must_use]
    pub fn lightness_window(&self, limits: LimitFlags) -> (f64, f64) {
        let lo = if limits.contains(LimitFlags::DARK) { self.dark } else { 0.0 };
        let hi = if limits.contains(LimitFlags::LIGHT) { self.light } else { 100.0 };
        (lo, hi)
    }

    /// Saturation interval a color may occupy under `limits`.
    #[must_use]
    pub fn saturation_window(&self, limits: LimitFlags) -> (f64, f64) {
        let lo = if limits.contains(LimitFlags::GRAY) { self.gray } else { 0.0 };
        (lo, 100.0)
    }
}
