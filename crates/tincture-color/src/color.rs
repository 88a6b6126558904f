// SPDX-License-Identifier: MIT
//
// Color value types: one record per color space, every field a branded unit.
//
// Because each field can only be built through its validator, a `Hsl`,
// `Rgb` or `Lab` in hand is always in range. `ColorValue` is the tagged
// union over all nine spaces; it serializes as `{ "format": ..., "value": ... }`.
//
// `Sl` and `Sv` are hue-less partial records used while a random color is
// being drawn, before a hue has been assigned.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ColorError, Result};
use crate::unit::{
    Alpha, ByteRange, HexSet, LabA, LabB, LabL, Percentile, Radial, XyzX, XyzY, XyzZ,
};

// ─── ColorSpace ──────────────────────────────────────────────────────────────

/// The nine supported color spaces (the `format` discriminator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    Cmyk,
    Hex,
    Hsl,
    Hsv,
    Lab,
    Rgb,
    Sl,
    Sv,
    Xyz,
}

impl ColorSpace {
    /// Lowercase name of this space, as used in the `format` tag.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cmyk => "cmyk",
            Self::Hex => "hex",
            Self::Hsl => "hsl",
            Self::Hsv => "hsv",
            Self::Lab => "lab",
            Self::Rgb => "rgb",
            Self::Sl => "sl",
            Self::Sv => "sv",
            Self::Xyz => "xyz",
        }
    }

    /// Parse a format tag (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::UnsupportedFormat`] for unknown tags.
    pub fn from_name(name: &str) -> Result<Self> {
        let lower = name.to_ascii_lowercase();
        Self::all()
            .iter()
            .find(|s| s.name() == lower)
            .copied()
            .ok_or_else(|| ColorError::unsupported_format(name))
    }

    /// All color spaces, in format-tag order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Cmyk, Self::Hex, Self::Hsl, Self::Hsv, Self::Lab,
            Self::Rgb, Self::Sl, Self::Sv, Self::Xyz,
        ]
    }

    /// Whether this space carries a hue (or enough information to derive one).
    #[must_use]
    pub const fn is_full(self) -> bool {
        !matches!(self, Self::Sl | Self::Sv)
    }
}

impl FromStr for ColorSpace {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// Subtractive ink percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cmyk {
    pub cyan: Percentile,
    pub magenta: Percentile,
    pub yellow: Percentile,
    pub key: Percentile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<Alpha>,
}

/// A `#rrggbb` triplet with an optional alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hex {
    pub hex: HexSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<Alpha>,
}

/// Hue, saturation, lightness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: Radial,
    pub saturation: Percentile,
    pub lightness: Percentile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<Alpha>,
}

/// Hue, saturation, value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub hue: Radial,
    pub saturation: Percentile,
    pub value: Percentile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<Alpha>,
}

/// CIELAB under the D65 reference white.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lab {
    pub l: LabL,
    pub a: LabA,
    pub b: LabB,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<Alpha>,
}

/// 8-bit sRGB.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub red: ByteRange,
    pub green: ByteRange,
    pub blue: ByteRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<Alpha>,
}

/// Saturation and lightness without a hue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sl {
    pub saturation: Percentile,
    pub lightness: Percentile,
}

/// Saturation and value without a hue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sv {
    pub saturation: Percentile,
    pub value: Percentile,
}

/// CIE 1931 XYZ, scaled so the reference white has Y = 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Xyz {
    pub x: XyzX,
    pub y: XyzY,
    pub z: XyzZ,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<Alpha>,
}

// ─── Constructors ────────────────────────────────────────────────────────────

impl Cmyk {
    /// Build from ink percentages.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::OutOfRange`] if any channel is outside [0, 100].
    pub fn new(cyan: f64, magenta: f64, yellow: f64, key: f64) -> Result<Self> {
        Ok(Self {
            cyan: Percentile::new(cyan)?,
            magenta: Percentile::new(magenta)?,
            yellow: Percentile::new(yellow)?,
            key: Percentile::new(key)?,
            alpha: None,
        })
    }
}

impl Hex {
    /// Parse `#rrggbb` or `#rrggbbaa`.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidHex`] for any other input.
    pub fn parse(value: &str) -> Result<Self> {
        let (hex, alpha) = HexSet::split_alpha(value)?;
        Ok(Self {
            hex,
            alpha: alpha.map(|c| Alpha::from_u8(c.get())),
        })
    }

    /// Wrap an already validated triplet.
    #[must_use]
    pub const fn from_set(hex: HexSet) -> Self {
        Self { hex, alpha: None }
    }
}

impl Hsl {
    /// Build from hue (degrees), saturation and lightness (percent).
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::OutOfRange`] if any component is outside its unit.
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Result<Self> {
        Ok(Self {
            hue: Radial::new(hue)?,
            saturation: Percentile::new(saturation)?,
            lightness: Percentile::new(lightness)?,
            alpha: None,
        })
    }
}

impl Hsv {
    /// Build from hue (degrees), saturation and value (percent).
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::OutOfRange`] if any component is outside its unit.
    pub fn new(hue: f64, saturation: f64, value: f64) -> Result<Self> {
        Ok(Self {
            hue: Radial::new(hue)?,
            saturation: Percentile::new(saturation)?,
            value: Percentile::new(value)?,
            alpha: None,
        })
    }
}

impl Lab {
    /// Build from L (percent) and the a/b axes.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::OutOfRange`] if any component is outside its unit.
    pub fn new(l: f64, a: f64, b: f64) -> Result<Self> {
        Ok(Self {
            l: LabL::new(l)?,
            a: LabA::new(a)?,
            b: LabB::new(b)?,
            alpha: None,
        })
    }
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Build from 8-bit channels. Every byte triple is valid.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: ByteRange::from_u8(red),
            green: ByteRange::from_u8(green),
            blue: ByteRange::from_u8(blue),
            alpha: None,
        }
    }

    /// Build from raw numbers, each of which must be an integer in [0, 255].
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::OutOfRange`] for fractional or out-of-range channels.
    pub fn try_new(red: f64, green: f64, blue: f64) -> Result<Self> {
        Ok(Self {
            red: ByteRange::new(red)?,
            green: ByteRange::new(green)?,
            blue: ByteRange::new(blue)?,
            alpha: None,
        })
    }

    /// The three channels as bytes.
    #[must_use]
    pub const fn bytes(self) -> (u8, u8, u8) {
        (self.red.get(), self.green.get(), self.blue.get())
    }
}

impl Sl {
    /// # Errors
    ///
    /// Returns [`ColorError::OutOfRange`] if either component is outside [0, 100].
    pub fn new(saturation: f64, lightness: f64) -> Result<Self> {
        Ok(Self {
            saturation: Percentile::new(saturation)?,
            lightness: Percentile::new(lightness)?,
        })
    }
}

impl Sv {
    /// # Errors
    ///
    /// Returns [`ColorError::OutOfRange`] if either component is outside [0, 100].
    pub fn new(saturation: f64, value: f64) -> Result<Self> {
        Ok(Self {
            saturation: Percentile::new(saturation)?,
            value: Percentile::new(value)?,
        })
    }
}

impl Xyz {
    /// # Errors
    ///
    /// Returns [`ColorError::OutOfRange`] if any component exceeds the reference white.
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self> {
        Ok(Self {
            x: XyzX::new(x)?,
            y: XyzY::new(y)?,
            z: XyzZ::new(z)?,
            alpha: None,
        })
    }
}

macro_rules! impl_with_alpha {
    ($($ty:ty),* $(,)?) => {$(
        impl $ty {
            /// Return a copy carrying the given alpha channel.
            #[inline]
            #[must_use]
            pub const fn with_alpha(self, alpha: Option<Alpha>) -> Self {
                Self { alpha, ..self }
            }
        }
    )*};
}

impl_with_alpha!(Cmyk, Hex, Hsl, Hsv, Lab, Rgb, Xyz);

// ─── ColorValue ──────────────────────────────────────────────────────────────

/// A color in any of the nine supported spaces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", content = "value", rename_all = "lowercase")]
pub enum ColorValue {
    Cmyk(Cmyk),
    Hex(Hex),
    Hsl(Hsl),
    Hsv(Hsv),
    Lab(Lab),
    Rgb(Rgb),
    Sl(Sl),
    Sv(Sv),
    Xyz(Xyz),
}

impl ColorValue {
    /// The format discriminator of this value.
    #[must_use]
    pub const fn format(&self) -> ColorSpace {
        match self {
            Self::Cmyk(_) => ColorSpace::Cmyk,
            Self::Hex(_) => ColorSpace::Hex,
            Self::Hsl(_) => ColorSpace::Hsl,
            Self::Hsv(_) => ColorSpace::Hsv,
            Self::Lab(_) => ColorSpace::Lab,
            Self::Rgb(_) => ColorSpace::Rgb,
            Self::Sl(_) => ColorSpace::Sl,
            Self::Sv(_) => ColorSpace::Sv,
            Self::Xyz(_) => ColorSpace::Xyz,
        }
    }

    /// The alpha channel, if this value carries one. Partial records never do.
    #[must_use]
    pub const fn alpha(&self) -> Option<Alpha> {
        match self {
            Self::Cmyk(c) => c.alpha,
            Self::Hex(c) => c.alpha,
            Self::Hsl(c) => c.alpha,
            Self::Hsv(c) => c.alpha,
            Self::Lab(c) => c.alpha,
            Self::Rgb(c) => c.alpha,
            Self::Xyz(c) => c.alpha,
            Self::Sl(_) | Self::Sv(_) => None,
        }
    }

    /// Return a copy carrying `alpha`. Partial records are returned unchanged.
    #[must_use]
    pub const fn with_alpha(self, alpha: Option<Alpha>) -> Self {
        match self {
            Self::Cmyk(c) => Self::Cmyk(c.with_alpha(alpha)),
            Self::Hex(c) => Self::Hex(c.with_alpha(alpha)),
            Self::Hsl(c) => Self::Hsl(c.with_alpha(alpha)),
            Self::Hsv(c) => Self::Hsv(c.with_alpha(alpha)),
            Self::Lab(c) => Self::Lab(c.with_alpha(alpha)),
            Self::Rgb(c) => Self::Rgb(c.with_alpha(alpha)),
            Self::Xyz(c) => Self::Xyz(c.with_alpha(alpha)),
            partial @ (Self::Sl(_) | Self::Sv(_)) => partial,
        }
    }
}

macro_rules! impl_from_record {
    ($($variant:ident),* $(,)?) => {$(
        impl From<$variant> for ColorValue {
            fn from(value: $variant) -> Self {
                Self::$variant(value)
            }
        }
    )*};
}

impl_from_record!(Cmyk, Hex, Hsl, Hsv, Lab, Rgb, Sl, Sv, Xyz);

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn color_space_names_roundtrip() {
        for &space in ColorSpace::all() {
            assert_eq!(ColorSpace::from_name(space.name()).unwrap(), space);
        }
        assert_eq!("HSL".parse::<ColorSpace>().unwrap(), ColorSpace::Hsl);
    }

    #[test]
    fn unknown_format_tag_is_unsupported() {
        let err = ColorSpace::from_name("oklch").unwrap_err();
        assert_eq!(err, ColorError::UnsupportedFormat("oklch".to_string()));
    }

    #[test]
    fn partial_spaces_are_not_full() {
        assert!(!ColorSpace::Sl.is_full());
        assert!(!ColorSpace::Sv.is_full());
        assert!(ColorSpace::Lab.is_full());
    }

    #[test]
    fn record_constructors_validate() {
        assert!(Hsl::new(200.0, 50.0, 50.0).is_ok());
        assert!(Hsl::new(360.0, 50.0, 50.0).is_err());
        assert!(Hsv::new(10.0, 101.0, 50.0).is_err());
        assert!(Cmyk::new(0.0, 0.0, 0.0, 100.0).is_ok());
        assert!(Lab::new(50.0, -130.0, 0.0).is_err());
        assert!(Xyz::new(95.047, 100.0, 108.883).is_ok());
        assert!(Rgb::try_new(255.0, 0.5, 0.0).is_err());
        assert!(Sl::new(10.0, 10.0).is_ok());
        assert!(Sv::new(10.0, -10.0).is_err());
    }

    #[test]
    fn hex_parse_keeps_alpha() {
        let hex = Hex::parse("#FF000080").unwrap();
        assert_eq!(hex.hex.rgb(), (255, 0, 0));
        assert_eq!(hex.alpha.map(Alpha::to_u8), Some(0x80));
        assert!(Hex::parse("#ff00").is_err());
    }

    #[test]
    fn format_and_alpha_accessors() {
        let value = ColorValue::from(Rgb::new(1, 2, 3));
        assert_eq!(value.format(), ColorSpace::Rgb);
        assert!(value.alpha().is_none());

        let half = Alpha::new(0.5).unwrap();
        let with = value.with_alpha(Some(half));
        assert_eq!(with.alpha(), Some(half));

        let partial = ColorValue::from(Sl::new(10.0, 20.0).unwrap()).with_alpha(Some(half));
        assert!(partial.alpha().is_none());
    }

    #[test]
    fn rgb_constants() {
        assert_eq!(Rgb::BLACK.bytes(), (0, 0, 0));
        assert_eq!(Rgb::WHITE.bytes(), (255, 255, 255));
    }

    fn from_toml(doc: &str) -> std::result::Result<ColorValue, toml::de::Error> {
        toml::from_str(doc)
    }

    #[test]
    fn deserialize_accepts_valid_records() {
        let value = from_toml(
            "format = \"hsl\"\n[value]\nhue = 200.0\nsaturation = 50.0\nlightness = 40.0\n",
        )
        .unwrap();
        assert_eq!(value, ColorValue::from(Hsl::new(200.0, 50.0, 40.0).unwrap()));

        let value = from_toml("format = \"hex\"\n[value]\nhex = \"#3366cc\"\n").unwrap();
        assert_eq!(value, ColorValue::from(Hex::parse("#3366cc").unwrap()));
    }

    #[test]
    fn deserialize_runs_the_validators() {
        let hue = from_toml(
            "format = \"hsl\"\n[value]\nhue = 400.0\nsaturation = 50.0\nlightness = 50.0\n",
        )
        .unwrap_err();
        assert!(hue.to_string().contains("out of range"), "{hue}");

        let hex = from_toml("format = \"hex\"\n[value]\nhex = \"#zz0000\"\n").unwrap_err();
        assert!(hex.to_string().contains("invalid hex color"), "{hex}");

        let byte = from_toml(
            "format = \"rgb\"\n[value]\nred = 12.5\ngreen = 0.0\nblue = 0.0\n",
        )
        .unwrap_err();
        assert!(byte.to_string().contains("out of range"), "{byte}");

        let alpha = from_toml(
            "format = \"rgb\"\n[value]\nred = 1.0\ngreen = 2.0\nblue = 3.0\nalpha = 1.5\n",
        )
        .unwrap_err();
        assert!(alpha.to_string().contains("out of range"), "{alpha}");
    }

    #[test]
    fn deserialize_rejects_unknown_format_tag() {
        assert!(from_toml("format = \"oklch\"\n[value]\nl = 1.0\n").is_err());
    }
}
