// SPDX-License-Identifier: MIT
//
// tincture-color: Validated color values across nine color spaces.
//
// Every numeric component is a branded unit (Percentile, Radial,
// ByteRange, LAB and XYZ axes) that can only be built through its
// validator, so a color record in hand is always in range. On top of the
// units sit the nine color records (CMYK, Hex, HSL, HSV, LAB, RGB, SL,
// SV, XYZ), a conversion engine that routes any space to any other
// through an unquantized sRGB pivot, and CSS text rendering.

// Mathematical code uses small integer-to-float casts.
#![allow(clippy::cast_precision_loss)]
// Color component names (r/g/b, x/y/z, l/a/b) are inherently similar.
#![allow(clippy::similar_names)]

pub mod color;
pub mod convert;
pub mod css;
pub mod error;
pub mod unit;

pub use color::{Cmyk, ColorSpace, ColorValue, Hex, Hsl, Hsv, Lab, Rgb, Sl, Sv, Xyz};
pub use convert::convert;
pub use css::to_css_string;
pub use error::{ColorError, Result};
pub use unit::{
    Alpha, Bounds, ByteRange, HexComponent, HexSet, LabA, LabB, LabL, Percentile, Radial,
    UnitKey, XyzX, XyzY, XyzZ, normalize_hue, validate_hex_component, validate_hex_set,
    validate_range,
};
