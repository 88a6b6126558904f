// SPDX-License-Identifier: MIT
//
// CSS text rendering: every color value as a functional string.
//
//   hsl(210, 50%, 40%)        hsla(210, 50%, 40%, 0.5)
//   rgb(51, 102, 153)         rgba(51, 102, 153, 0.5)
//   #336699                   #33669980
//   lab(42.37, -2.91, -33.4)  cmyk(67%, 33%, 0%, 40%)
//   hsv(210, 66.67%, 60%)     xyz(12.83, 13.19, 32.25)
//   sl(50%, 40%)              sv(66.67%, 60%)
//
// CMYK, HSV, XYZ and the partial records have no browser form; they use
// the same functional shape for display. Numbers are rounded to two
// decimals with trailing zeros dropped. An alpha channel is always the
// last argument (and turns `hsl`/`rgb` into `hsla`/`rgba`).

use std::fmt::{self, Write};

use crate::color::{Cmyk, ColorValue, Hex, Hsl, Hsv, Lab, Rgb, Sl, Sv, Xyz};
use crate::unit::Alpha;

/// Render `color` as CSS function text.
#[must_use]
pub fn to_css_string(color: &ColorValue) -> String {
    match color {
        ColorValue::Cmyk(c) => functional(
            "cmyk",
            &[
                percent(c.cyan.get()),
                percent(c.magenta.get()),
                percent(c.yellow.get()),
                percent(c.key.get()),
            ],
            c.alpha,
        ),
        ColorValue::Hex(c) => match c.alpha {
            Some(a) => format!("{}{:02x}", c.hex, a.to_u8()),
            None => c.hex.to_string(),
        },
        ColorValue::Hsl(c) => functional(
            if c.alpha.is_some() { "hsla" } else { "hsl" },
            &[
                number(c.hue.get()),
                percent(c.saturation.get()),
                percent(c.lightness.get()),
            ],
            c.alpha,
        ),
        ColorValue::Hsv(c) => functional(
            "hsv",
            &[
                number(c.hue.get()),
                percent(c.saturation.get()),
                percent(c.value.get()),
            ],
            c.alpha,
        ),
        ColorValue::Lab(c) => functional(
            "lab",
            &[number(c.l.get()), number(c.a.get()), number(c.b.get())],
            c.alpha,
        ),
        ColorValue::Rgb(c) => functional(
            if c.alpha.is_some() { "rgba" } else { "rgb" },
            &[c.red.to_string(), c.green.to_string(), c.blue.to_string()],
            c.alpha,
        ),
        ColorValue::Sl(c) => functional(
            "sl",
            &[percent(c.saturation.get()), percent(c.lightness.get())],
            None,
        ),
        ColorValue::Sv(c) => functional(
            "sv",
            &[percent(c.saturation.get()), percent(c.value.get())],
            None,
        ),
        ColorValue::Xyz(c) => functional(
            "xyz",
            &[number(c.x.get()), number(c.y.get()), number(c.z.get())],
            c.alpha,
        ),
    }
}

fn functional(name: &str, args: &[String], alpha: Option<Alpha>) -> String {
    let mut out = String::with_capacity(32);
    out.push_str(name);
    out.push('(');
    out.push_str(&args.join(", "));
    if let Some(a) = alpha {
        // Writing to a String cannot fail.
        let _ = write!(out, ", {}", number(a.get()));
    }
    out.push(')');
    out
}

fn percent(v: f64) -> String {
    format!("{}%", number(v))
}

/// Round to two decimals; `Display` for f64 already drops trailing zeros.
fn number(v: f64) -> String {
    // Adding 0.0 turns a rounded -0 into 0.
    let rounded = (v * 100.0).round() / 100.0 + 0.0;
    rounded.to_string()
}

// ─── Display ─────────────────────────────────────────────────────────────────

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_css_string(self))
    }
}

macro_rules! impl_css_display {
    ($($ty:ty),* $(,)?) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&to_css_string(&ColorValue::from(*self)))
            }
        }
    )*};
}

impl_css_display!(Cmyk, Hex, Hsl, Hsv, Lab, Rgb, Sl, Sv, Xyz);

// ─── Tests ───────────────────────────────────────────────────────────────────
