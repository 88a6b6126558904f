// SPDX-License-Identifier: MIT
//
// Conversion engine: any color space to any other.
//
// Single-character variable names (r, g, b, h, s, l, c, m, y, k) are the
// standard mathematical convention in color science.
#![allow(clippy::many_single_char_names)]
//
// Routing:
//
//   CMYK ─┐                   ┌─ LAB ↔ XYZ
//   Hex  ─┼─ sRGB (f64) ──────┼─ XYZ
//   RGB  ─┘     ↕             └─ CMYK / Hex / RGB
//              HSL ↔ HSV ↔ SV
//               ↕
//               SL
//
// The pivot is unquantized sRGB in [0, 255]. Only the RGB and Hex outputs
// round to whole bytes, so chains like LAB → HSL → LAB never pass through
// 8-bit quantization. Direct formulas are used where they exist
// (HSL ↔ HSV, LAB ↔ XYZ) to keep rounding error from compounding.
//
// Conversion assumes validated input; it never re-checks ranges. Outputs
// are pulled into their unit ranges with `UnitKey::fit` (gamma curves and
// matrix rounding overshoot by ~1e-12) and then built through the normal
// validating constructors.

use crate::color::{Cmyk, ColorSpace, ColorValue, Hex, Hsl, Hsv, Lab, Rgb, Sl, Sv, Xyz};
use crate::error::Result;
use crate::unit::{
    ByteRange, HexSet, LabA, LabB, LabL, Percentile, REFERENCE_WHITE, Radial, UnitKey, XyzX,
    XyzY, XyzZ,
};

/// Convert `color` into `to`. A same-space request returns a copy.
///
/// # Errors
///
/// Only fails if a computed component cannot be branded, which indicates a
/// bug in the conversion math rather than bad input.
pub fn convert(color: &ColorValue, to: ColorSpace) -> Result<ColorValue> {
    if color.format() == to {
        return Ok(*color);
    }
    Ok(match to {
        ColorSpace::Cmyk => color.to_cmyk()?.into(),
        ColorSpace::Hex => color.to_hex()?.into(),
        ColorSpace::Hsl => color.to_hsl()?.into(),
        ColorSpace::Hsv => color.to_hsv()?.into(),
        ColorSpace::Lab => color.to_lab()?.into(),
        ColorSpace::Rgb => color.to_rgb()?.into(),
        ColorSpace::Sl => color.to_sl()?.into(),
        ColorSpace::Sv => color.to_sv()?.into(),
        ColorSpace::Xyz => color.to_xyz()?.into(),
    })
}

impl ColorValue {
    /// Convert into another space. See [`convert`].
    ///
    /// # Errors
    ///
    /// See [`convert`].
    pub fn convert(&self, to: ColorSpace) -> Result<Self> {
        convert(self, to)
    }

    /// # Errors
    ///
    /// See [`convert`].
    pub fn to_cmyk(&self) -> Result<Cmyk> {
        if let Self::Cmyk(c) = self {
            return Ok(*c);
        }
        let (c, m, y, k) = rgb_to_cmyk(self.rgb_f());
        Ok(Cmyk {
            cyan: percent(c)?,
            magenta: percent(m)?,
            yellow: percent(y)?,
            key: percent(k)?,
            alpha: self.alpha(),
        })
    }

    /// # Errors
    ///
    /// See [`convert`].
    pub fn to_hex(&self) -> Result<Hex> {
        if let Self::Hex(c) = self {
            return Ok(*c);
        }
        let (r, g, b) = self.to_rgb()?.bytes();
        Ok(Hex::from_set(HexSet::from_rgb(r, g, b)).with_alpha(self.alpha()))
    }

    /// # Errors
    ///
    /// See [`convert`].
    pub fn to_hsl(&self) -> Result<Hsl> {
        if let Self::Hsl(c) = self {
            return Ok(*c);
        }
        let (h, s, l) = self.hsl_f();
        Ok(Hsl {
            hue: hue(h)?,
            saturation: percent(s)?,
            lightness: percent(l)?,
            alpha: self.alpha(),
        })
    }

    /// # Errors
    ///
    /// See [`convert`].
    pub fn to_hsv(&self) -> Result<Hsv> {
        if let Self::Hsv(c) = self {
            return Ok(*c);
        }
        let (h, s, v) = self.hsv_f();
        Ok(Hsv {
            hue: hue(h)?,
            saturation: percent(s)?,
            value: percent(v)?,
            alpha: self.alpha(),
        })
    }

    /// # Errors
    ///
    /// See [`convert`].
    pub fn to_lab(&self) -> Result<Lab> {
        if let Self::Lab(c) = self {
            return Ok(*c);
        }
        let (l, a, b) = xyz_to_lab(self.xyz_f());
        Ok(Lab {
            l: LabL::new(UnitKey::LabL.fit(l))?,
            a: LabA::new(UnitKey::LabA.fit(a))?,
            b: LabB::new(UnitKey::LabB.fit(b))?,
            alpha: self.alpha(),
        })
    }

    /// # Errors
    ///
    /// See [`convert`].
    pub fn to_rgb(&self) -> Result<Rgb> {
        if let Self::Rgb(c) = self {
            return Ok(*c);
        }
        let (r, g, b) = self.rgb_f();
        Ok(Rgb {
            red: byte(r)?,
            green: byte(g)?,
            blue: byte(b)?,
            alpha: self.alpha(),
        })
    }

    /// # Errors
    ///
    /// See [`convert`].
    pub fn to_sl(&self) -> Result<Sl> {
        if let Self::Sl(c) = self {
            return Ok(*c);
        }
        let (_, s, l) = self.hsl_f();
        Ok(Sl {
            saturation: percent(s)?,
            lightness: percent(l)?,
        })
    }

    /// # Errors
    ///
    /// See [`convert`].
    pub fn to_sv(&self) -> Result<Sv> {
        if let Self::Sv(c) = self {
            return Ok(*c);
        }
        let (_, s, v) = self.hsv_f();
        Ok(Sv {
            saturation: percent(s)?,
            value: percent(v)?,
        })
    }

    /// # Errors
    ///
    /// See [`convert`].
    pub fn to_xyz(&self) -> Result<Xyz> {
        if let Self::Xyz(c) = self {
            return Ok(*c);
        }
        let (x, y, z) = self.xyz_f();
        Ok(Xyz {
            x: XyzX::new(UnitKey::XyzX.fit(x))?,
            y: XyzY::new(UnitKey::XyzY.fit(y))?,
            z: XyzZ::new(UnitKey::XyzZ.fit(z))?,
            alpha: self.alpha(),
        })
    }

    // ─── Float pivots ────────────────────────────────────────────────────

    /// Unquantized sRGB, channels in [0, 255].
    fn rgb_f(&self) -> (f64, f64, f64) {
        match self {
            Self::Cmyk(c) => cmyk_to_rgb(
                c.cyan.get(),
                c.magenta.get(),
                c.yellow.get(),
                c.key.get(),
            ),
            Self::Hex(c) => {
                let (r, g, b) = c.hex.rgb();
                (f64::from(r), f64::from(g), f64::from(b))
            }
            Self::Hsl(c) => hsl_to_rgb(c.hue.get(), c.saturation.get(), c.lightness.get()),
            Self::Hsv(c) => {
                let (s, l) = hsv_to_hsl(c.saturation.get(), c.value.get());
                hsl_to_rgb(c.hue.get(), s, l)
            }
            Self::Lab(c) => xyz_to_rgb(lab_to_xyz(c.l.get(), c.a.get(), c.b.get())),
            Self::Rgb(c) => (c.red.into(), c.green.into(), c.blue.into()),
            Self::Sl(c) => hsl_to_rgb(0.0, c.saturation.get(), c.lightness.get()),
            Self::Sv(c) => {
                let (s, l) = hsv_to_hsl(c.saturation.get(), c.value.get());
                hsl_to_rgb(0.0, s, l)
            }
            Self::Xyz(c) => xyz_to_rgb((c.x.get(), c.y.get(), c.z.get())),
        }
    }

    /// Hue in degrees, saturation and lightness in percent.
    fn hsl_f(&self) -> (f64, f64, f64) {
        match self {
            Self::Hsl(c) => (c.hue.get(), c.saturation.get(), c.lightness.get()),
            Self::Hsv(c) => {
                let (s, l) = hsv_to_hsl(c.saturation.get(), c.value.get());
                (c.hue.get(), s, l)
            }
            Self::Sl(c) => (0.0, c.saturation.get(), c.lightness.get()),
            Self::Sv(c) => {
                let (s, l) = hsv_to_hsl(c.saturation.get(), c.value.get());
                (0.0, s, l)
            }
            _ => rgb_to_hsl(self.rgb_f()),
        }
    }

    /// Hue in degrees, saturation and value in percent.
    fn hsv_f(&self) -> (f64, f64, f64) {
        match self {
            Self::Hsv(c) => (c.hue.get(), c.saturation.get(), c.value.get()),
            Self::Sv(c) => (0.0, c.saturation.get(), c.value.get()),
            _ => {
                let (h, s, l) = self.hsl_f();
                let (s, v) = hsl_to_hsv(s, l);
                (h, s, v)
            }
        }
    }

    /// XYZ scaled to the reference white (Y in [0, 100]).
    fn xyz_f(&self) -> (f64, f64, f64) {
        match self {
            Self::Xyz(c) => (c.x.get(), c.y.get(), c.z.get()),
            Self::Lab(c) => lab_to_xyz(c.l.get(), c.a.get(), c.b.get()),
            _ => rgb_to_xyz(self.rgb_f()),
        }
    }
}

macro_rules! impl_record_conversions {
    ($($ty:ty),* $(,)?) => {$(
        impl $ty {
            /// Convert into another space. See [`convert`].
            ///
            /// # Errors
            ///
            /// See [`convert`].
            pub fn convert(self, to: ColorSpace) -> Result<ColorValue> {
                convert(&ColorValue::from(self), to)
            }
        }
    )*};
}

impl_record_conversions!(Cmyk, Hex, Hsl, Hsv, Lab, Rgb, Sl, Sv, Xyz);

/// Chroma (in [0, 1] channel units) below which a color counts as neutral.
/// Float round trips leave ~1e-15 of noise on grays; without a floor that
/// noise becomes a random hue or a random set of CMYK inks.
const NEUTRAL_EPSILON: f64 = 1e-9;

fn percent(v: f64) -> Result<Percentile> {
    Percentile::new(UnitKey::Percentile.fit(v))
}

fn hue(v: f64) -> Result<Radial> {
    Radial::new(UnitKey::Radial.fit(v))
}

fn byte(v: f64) -> Result<ByteRange> {
    ByteRange::new(UnitKey::ByteRange.fit(v))
}

// ─── RGB ↔ HSL ───────────────────────────────────────────────────────────────

/// sRGB [0, 255] → (hue°, saturation %, lightness %).
#[must_use]
pub fn rgb_to_hsl((r, g, b): (f64, f64, f64)) -> (f64, f64, f64) {
    let (r, g, b) = (r / 255.0, g / 255.0, b / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let d = max - min;

    if d < NEUTRAL_EPSILON {
        // Achromatic, hue is undefined, default to 0
        return (0.0, 0.0, l * 100.0);
    }

    let s = d / (1.0 - 2.0f64.mul_add(l, -1.0).abs());
    #[allow(clippy::float_cmp)]
    let h = if max == r {
        ((g - b) / d).rem_euclid(6.0)
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h * 60.0, s * 100.0, l * 100.0)
}

/// (hue°, saturation %, lightness %) → sRGB [0, 255], unrounded.
#[must_use]
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let s = s / 100.0;
    let l = l / 100.0;
    let c = (1.0 - 2.0f64.mul_add(l, -1.0).abs()) * s;
    let hp = h.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match hp {
        hp if hp < 1.0 => (c, x, 0.0),
        hp if hp < 2.0 => (x, c, 0.0),
        hp if hp < 3.0 => (0.0, c, x),
        hp if hp < 4.0 => (0.0, x, c),
        hp if hp < 5.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    clamp_rgb(((r + m) * 255.0, (g + m) * 255.0, (b + m) * 255.0))
}

// ─── HSL ↔ HSV ───────────────────────────────────────────────────────────────

/// HSL (saturation %, lightness %) → HSV (saturation %, value %). Hue is shared.
#[must_use]
pub fn hsl_to_hsv(s: f64, l: f64) -> (f64, f64) {
    let s = s / 100.0;
    let l = l / 100.0;
    let v = s.mul_add(l.min(1.0 - l), l);
    let sv = if v <= 0.0 { 0.0 } else { 2.0 * (1.0 - l / v) };
    (sv * 100.0, v * 100.0)
}

/// HSV (saturation %, value %) → HSL (saturation %, lightness %). Hue is shared.
#[must_use]
pub fn hsv_to_hsl(s: f64, v: f64) -> (f64, f64) {
    let s = s / 100.0;
    let v = v / 100.0;
    let l = v * (1.0 - s / 2.0);
    let denom = l.min(1.0 - l);
    let sl = if denom <= 0.0 { 0.0 } else { (v - l) / denom };
    (sl * 100.0, l * 100.0)
}

// ─── RGB ↔ CMYK ──────────────────────────────────────────────────────────────

/// sRGB [0, 255] → CMYK percentages.
///
/// Black (`key == 1`, within float noise) short-circuits to zero inks instead of
/// dividing by `1 - key`.
#[must_use]
pub fn rgb_to_cmyk((r, g, b): (f64, f64, f64)) -> (f64, f64, f64, f64) {
    let (r, g, b) = (r / 255.0, g / 255.0, b / 255.0);
    let k = 1.0 - r.max(g).max(b);
    if 1.0 - k < NEUTRAL_EPSILON {
        return (0.0, 0.0, 0.0, 100.0);
    }
    let ink = |channel: f64| (1.0 - channel - k) / (1.0 - k) * 100.0;
    (ink(r), ink(g), ink(b), k * 100.0)
}

/// CMYK percentages → sRGB [0, 255], unrounded.
#[must_use]
pub fn cmyk_to_rgb(c: f64, m: f64, y: f64, k: f64) -> (f64, f64, f64) {
    let k = 1.0 - k / 100.0;
    let channel = |ink: f64| 255.0 * (1.0 - ink / 100.0) * k;
    clamp_rgb((channel(c), channel(m), channel(y)))
}

// ─── RGB ↔ XYZ ───────────────────────────────────────────────────────────────
//
// sRGB primaries with the D65 white point. The Y row is trimmed in its last
// digit so each row sums to the reference white exactly; the inverse is the
// exact inverse of the forward matrix so RGB → XYZ → RGB round-trips to
// machine precision.

#[allow(clippy::unreadable_literal)]
const LINEAR_RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721749],
    [0.0193339, 0.1191920, 0.9503041],
];

#[allow(clippy::unreadable_literal, clippy::excessive_precision)]
const XYZ_TO_LINEAR_RGB: [[f64; 3]; 3] = [
    [3.2404548274682425, -1.537138818740969, -0.4985317093786646],
    [-0.9692663794368876, 1.8760108905670188, 0.04155628068326538],
    [0.05564341846894406, -0.2040258501050433, 1.0572251408878026],
];

fn mat_mul(m: &[[f64; 3]; 3], (a, b, c): (f64, f64, f64)) -> (f64, f64, f64) {
    (
        m[0][2].mul_add(c, m[0][0].mul_add(a, m[0][1] * b)),
        m[1][2].mul_add(c, m[1][0].mul_add(a, m[1][1] * b)),
        m[2][2].mul_add(c, m[2][0].mul_add(a, m[2][1] * b)),
    )
}

/// Convert a single sRGB component (0.0–1.0) to linear light.
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert a single linear-light component (0.0–1.0) to sRGB (apply gamma).
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f64.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// sRGB [0, 255] → XYZ (Y in [0, 100]).
#[must_use]
pub fn rgb_to_xyz((r, g, b): (f64, f64, f64)) -> (f64, f64, f64) {
    let linear = (
        srgb_to_linear(r / 255.0),
        srgb_to_linear(g / 255.0),
        srgb_to_linear(b / 255.0),
    );
    let (x, y, z) = mat_mul(&LINEAR_RGB_TO_XYZ, linear);
    (x * 100.0, y * 100.0, z * 100.0)
}

/// XYZ (Y in [0, 100]) → sRGB [0, 255], clamped to the displayable range.
#[must_use]
pub fn xyz_to_rgb((x, y, z): (f64, f64, f64)) -> (f64, f64, f64) {
    let (r, g, b) = mat_mul(&XYZ_TO_LINEAR_RGB, (x / 100.0, y / 100.0, z / 100.0));
    // Negative linear light has no sRGB encoding; clamp before the gamma curve.
    let encode = |c: f64| linear_to_srgb(c.max(0.0)) * 255.0;
    clamp_rgb((encode(r), encode(g), encode(b)))
}

fn clamp_rgb((r, g, b): (f64, f64, f64)) -> (f64, f64, f64) {
    (r.clamp(0.0, 255.0), g.clamp(0.0, 255.0), b.clamp(0.0, 255.0))
}

// ─── XYZ ↔ LAB ───────────────────────────────────────────────────────────────
//
// CIE constants in their exact rational form (216/24389, 24389/27) rather
// than the rounded 0.008856 / 903.3, so both directions agree at the knee.

const LAB_EPSILON: f64 = 216.0 / 24389.0;
const LAB_KAPPA: f64 = 24389.0 / 27.0;

/// XYZ (Y in [0, 100]) → CIELAB.
#[must_use]
pub fn xyz_to_lab((x, y, z): (f64, f64, f64)) -> (f64, f64, f64) {
    let f = |t: f64| {
        if t > LAB_EPSILON {
            t.cbrt()
        } else {
            LAB_KAPPA.mul_add(t, 16.0) / 116.0
        }
    };
    let fx = f(x / REFERENCE_WHITE[0]);
    let fy = f(y / REFERENCE_WHITE[1]);
    let fz = f(z / REFERENCE_WHITE[2]);

    (
        116.0f64.mul_add(fy, -16.0),
        500.0 * (fx - fy),
        200.0 * (fy - fz),
    )
}

/// CIELAB → XYZ (Y in [0, 100]).
#[must_use]
pub fn lab_to_xyz(l: f64, a: f64, b: f64) -> (f64, f64, f64) {
    let fy = (l + 16.0) / 116.0;
    let fx = a / 500.0 + fy;
    let fz = fy - b / 200.0;

    let finv = |t: f64| {
        let t3 = t * t * t;
        if t3 > LAB_EPSILON {
            t3
        } else {
            116.0f64.mul_add(t, -16.0) / LAB_KAPPA
        }
    };
    let yr = if l > LAB_KAPPA * LAB_EPSILON { fy * fy * fy } else { l / LAB_KAPPA };

    (
        finv(fx) * REFERENCE_WHITE[0],
        yr * REFERENCE_WHITE[1],
        finv(fz) * REFERENCE_WHITE[2],
    )
}

// ─── Tests ───────────────────────────────────────────────────────────────────
