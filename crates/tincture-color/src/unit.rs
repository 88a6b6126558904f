// SPDX-License-Identifier: MIT
//
// Branded scalar units: the validated building blocks of every color value.
//
// A raw `f64` never becomes a hue, a percentage or a LAB axis by casting.
// Every unit type has a private field and a single validating constructor,
// so any unit value in hand is known to be in range. Downstream code
// (conversion, CSS rendering, palette generation) relies on that contract
// and never re-validates.
//
//   Percentile   [0, 100]
//   Radial       [0, 360)      hue angle, never wrapped by the constructor
//   ByteRange    [0, 255]      integer
//   Alpha        [0, 1]
//   LabL         [0, 100]
//   LabA, LabB   [-125, 125]
//   XyzX/Y/Z     [0, reference white]
//   HexSet       "#rrggbb"     alpha suffix split off into HexComponent

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ColorError, Result};

/// Magnitude limit of the LAB a/b axes.
pub const LAB_AB_LIMIT: f64 = 125.0;

/// CIE D65 reference white in XYZ (scaled so that Y = 100).
pub const REFERENCE_WHITE: [f64; 3] = [95.047, 100.0, 108.883];

// ─── Unit keys & bounds ──────────────────────────────────────────────────────

/// Identity of a branded numeric unit, used to look up its legal range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitKey {
    Percentile,
    Radial,
    ByteRange,
    Alpha,
    LabL,
    LabA,
    LabB,
    XyzX,
    XyzY,
    XyzZ,
}

impl UnitKey {
    /// The legal range of this unit.
    #[must_use]
    pub const fn bounds(self) -> Bounds {
        match self {
            Self::Percentile | Self::LabL => Bounds::inclusive(0.0, 100.0),
            Self::Radial => Bounds::half_open(0.0, 360.0),
            Self::ByteRange => Bounds::inclusive(0.0, 255.0),
            Self::Alpha => Bounds::inclusive(0.0, 1.0),
            Self::LabA | Self::LabB => Bounds::inclusive(-LAB_AB_LIMIT, LAB_AB_LIMIT),
            Self::XyzX => Bounds::inclusive(0.0, REFERENCE_WHITE[0]),
            Self::XyzY => Bounds::inclusive(0.0, REFERENCE_WHITE[1]),
            Self::XyzZ => Bounds::inclusive(0.0, REFERENCE_WHITE[2]),
        }
    }

    /// Human-readable unit name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Percentile => "percentile",
            Self::Radial => "radial",
            Self::ByteRange => "byte-range",
            Self::Alpha => "alpha",
            Self::LabL => "lab-l",
            Self::LabA => "lab-a",
            Self::LabB => "lab-b",
            Self::XyzX => "xyz-x",
            Self::XyzY => "xyz-y",
            Self::XyzZ => "xyz-z",
        }
    }

    /// Pull a computed value into this unit's range.
    ///
    /// Conversion math can land a hair outside the bounds (gamma curves,
    /// matrix rounding, white point sums). Hues are wrapped, byte channels
    /// are rounded, everything else is clamped. NaN stays NaN so the
    /// validating constructor still rejects it.
    #[must_use]
    pub fn fit(self, value: f64) -> f64 {
        match self {
            Self::Radial => normalize_hue(value),
            Self::ByteRange => value.round().clamp(0.0, 255.0),
            _ => {
                let b = self.bounds();
                value.clamp(b.min, b.max)
            }
        }
    }
}

impl fmt::Display for UnitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A numeric range, closed at the bottom and optionally open at the top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
    pub max_inclusive: bool,
}

impl Bounds {
    #[must_use]
    pub const fn inclusive(min: f64, max: f64) -> Self {
        Self { min, max, max_inclusive: true }
    }

    #[must_use]
    pub const fn half_open(min: f64, max: f64) -> Self {
        Self { min, max, max_inclusive: false }
    }

    /// Whether `value` lies in this range. Non-finite values never do.
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        if !value.is_finite() || value < self.min {
            return false;
        }
        if self.max_inclusive { value <= self.max } else { value < self.max }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let close = if self.max_inclusive { ']' } else { ')' };
        write!(f, "[{}, {}{close}", self.min, self.max)
    }
}

/// Check `value` against the range of `unit`.
///
/// # Errors
///
/// Returns [`ColorError::OutOfRange`] when the value is outside the bounds,
/// not finite, or (for [`UnitKey::ByteRange`]) not an integer.
pub fn validate_range(value: f64, unit: UnitKey) -> Result<()> {
    let in_bounds = unit.bounds().contains(value);
    let integral = unit != UnitKey::ByteRange || value.fract() == 0.0;
    if in_bounds && integral {
        Ok(())
    } else {
        Err(ColorError::out_of_range(unit, value))
    }
}

/// Wrap an angle into [0, 360).
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0.
    if h >= 360.0 { 0.0 } else { h }
}

// ─── Float-backed units ──────────────────────────────────────────────────────

macro_rules! branded_float {
    ($(#[$meta:meta])* $name:ident => $key:expr, $alias:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
        #[serde(try_from = "f64", into = "f64")]
        pub struct $name(f64);

        impl $name {
            /// Validate `value` and brand it.
            ///
            /// # Errors
            ///
            /// Returns [`ColorError::OutOfRange`] when `value` is outside the unit's bounds.
            #[doc(alias = $alias)]
            pub fn new(value: f64) -> Result<Self> {
                validate_range(value, $key)?;
                Ok(Self(value))
            }

            /// The raw value.
            #[inline]
            #[must_use]
            pub const fn get(self) -> f64 {
                self.0
            }
        }

        impl TryFrom<f64> for $name {
            type Error = ColorError;

            fn try_from(value: f64) -> Result<Self> {
                Self::new(value)
            }
        }

        impl From<$name> for f64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

branded_float!(
    /// A percentage in [0, 100]: saturation, lightness, value, CMYK inks.
    Percentile => UnitKey::Percentile, "as_percentile"
);
branded_float!(
    /// A hue angle in degrees, [0, 360).
    ///
    /// The constructor rejects out-of-range input instead of wrapping it;
    /// hue math wraps explicitly with [`normalize_hue`].
    Radial => UnitKey::Radial, "as_radial"
);
branded_float!(
    /// Opacity in [0, 1].
    Alpha => UnitKey::Alpha, "as_alpha"
);
branded_float!(
    /// CIELAB lightness in [0, 100].
    LabL => UnitKey::LabL, "as_lab_l"
);
branded_float!(
    /// CIELAB green–red axis.
    LabA => UnitKey::LabA, "as_lab_a"
);
branded_float!(
    /// CIELAB blue–yellow axis.
    LabB => UnitKey::LabB, "as_lab_b"
);
branded_float!(
    /// CIE XYZ X, bounded by the reference white.
    XyzX => UnitKey::XyzX, "as_xyz_x"
);
branded_float!(
    /// CIE XYZ Y (luminance), [0, 100].
    XyzY => UnitKey::XyzY, "as_xyz_y"
);
branded_float!(
    /// CIE XYZ Z, bounded by the reference white.
    XyzZ => UnitKey::XyzZ, "as_xyz_z"
);

impl Alpha {
    /// Alpha from an 8-bit channel (`0xff` = opaque).
    #[must_use]
    pub fn from_u8(byte: u8) -> Self {
        Self(f64::from(byte) / 255.0)
    }

    /// Alpha as an 8-bit channel, correctly rounded.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_u8(self) -> u8 {
        // Bounds guarantee 0.0 <= value <= 255.0 before truncation.
        (self.0 * 255.0).round() as u8
    }
}

// ─── ByteRange ───────────────────────────────────────────────────────────────

/// An 8-bit color channel, [0, 255].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "u8")]
pub struct ByteRange(u8);

impl ByteRange {
    /// Validate `value` (must be an integer in [0, 255]) and brand it.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::OutOfRange`] for fractional or out-of-range input.
    #[doc(alias = "as_byte_range")]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(value: f64) -> Result<Self> {
        validate_range(value, UnitKey::ByteRange)?;
        Ok(Self(value as u8))
    }

    /// Every `u8` is a valid channel.
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        Self(value)
    }

    #[inline]
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<f64> for ByteRange {
    type Error = ColorError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<u8> for ByteRange {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<ByteRange> for u8 {
    fn from(value: ByteRange) -> Self {
        value.0
    }
}

impl From<ByteRange> for f64 {
    fn from(value: ByteRange) -> Self {
        Self::from(value.0)
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// ─── Hex strings ─────────────────────────────────────────────────────────────

/// A six-digit hex color triplet, stored as bytes and rendered as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexSet([u8; 3]);

impl HexSet {
    /// Parse `#` followed by exactly six hex digits (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidHex`] for anything else, including
    /// eight-digit input (use [`HexSet::split_alpha`] for that).
    #[doc(alias = "as_hex_set")]
    pub fn new(value: &str) -> Result<Self> {
        let digits = value
            .strip_prefix('#')
            .filter(|d| d.len() == 6)
            .ok_or_else(|| ColorError::invalid_hex(value))?;
        parse_triplet(digits.as_bytes())
            .map(Self)
            .ok_or_else(|| ColorError::invalid_hex(value))
    }

    /// Parse `#rrggbb` or `#rrggbbaa`, splitting the alpha digits off.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidHex`] when the input is neither form.
    pub fn split_alpha(value: &str) -> Result<(Self, Option<HexComponent>)> {
        let invalid = || ColorError::invalid_hex(value);
        let digits = value.strip_prefix('#').ok_or_else(invalid)?;
        match digits.len() {
            6 => Ok((Self::new(value)?, None)),
            8 => {
                let triplet = parse_triplet(&digits.as_bytes()[..6]).ok_or_else(invalid)?;
                let alpha = HexComponent::new(&digits[6..]).map_err(|_| invalid())?;
                Ok((Self(triplet), Some(alpha)))
            }
            _ => Err(invalid()),
        }
    }

    /// Build from RGB bytes. Every byte triple is a valid hex set.
    #[must_use]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// The red, green and blue bytes.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        (self.0[0], self.0[1], self.0[2])
    }
}

impl TryFrom<String> for HexSet {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<HexSet> for String {
    fn from(value: HexSet) -> Self {
        value.to_string()
    }
}

impl fmt::Display for HexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

/// Two hex digits: the alpha suffix of an eight-digit hex color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexComponent(u8);

impl HexComponent {
    /// Parse exactly two hex digits.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidHex`] for anything else.
    pub fn new(value: &str) -> Result<Self> {
        let bytes = value.as_bytes();
        if bytes.len() != 2 {
            return Err(ColorError::invalid_hex(value));
        }
        parse_hex_byte(bytes)
            .map(Self)
            .ok_or_else(|| ColorError::invalid_hex(value))
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Whether `value` is `#` followed by exactly six hex digits.
#[must_use]
pub fn validate_hex_set(value: &str) -> bool {
    HexSet::new(value).is_ok()
}

/// Whether `value` is exactly two hex digits.
#[must_use]
pub fn validate_hex_component(value: &str) -> bool {
    HexComponent::new(value).is_ok()
}

fn parse_triplet(digits: &[u8]) -> Option<[u8; 3]> {
    Some([
        parse_hex_byte(&digits[0..2])?,
        parse_hex_byte(&digits[2..4])?,
        parse_hex_byte(&digits[4..6])?,
    ])
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
