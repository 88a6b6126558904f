// SPDX-License-Identifier: MIT
//
// Subcommand implementations. Each returns the lines it wants printed so
// the output format can be tested without capturing stdout.

use anyhow::{Context, Result};
use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use tincture_color::{ColorSpace, ColorValue, Hex, convert, to_css_string};
use tincture_palette::{
    EngineConfig, Palette, PaletteGenerator, PaletteType, RandSource, SelectedPaletteOptions,
};

use crate::cli::{ConvertArgs, GenerateArgs};

/// Accept `#rrggbb`, `#rrggbbaa`, or either without the leading `#`.
pub fn parse_hex(input: &str) -> Result<ColorValue> {
    let trimmed = input.trim();
    let text = if trimmed.starts_with('#') {
        trimmed.to_string()
    } else {
        format!("#{trimmed}")
    };
    let hex = Hex::parse(&text).with_context(|| format!("'{input}' is not a hex color"))?;
    Ok(hex.into())
}

// ─── generate ───────────────────────────────────────────────────────────────

pub fn run_generate(args: &GenerateArgs) -> Result<Vec<String>> {
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading engine config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let options = SelectedPaletteOptions {
        palette_type: args.palette_type,
        swatch_count: args.count,
        limit_dark: args.limit_dark,
        limit_gray: args.limit_gray,
        limit_light: args.limit_light,
        distribution: args.distribution,
        custom_base_color: args.base.as_deref().map(parse_hex).transpose()?,
        enable_alpha: args.alpha,
    };

    let now = Utc::now();
    let id = args
        .id
        .clone()
        .unwrap_or_else(|| format!("palette-{}", now.timestamp_millis()));

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    debug!(seed = ?args.seed, "seeded generator");

    let palette = PaletteGenerator::new(&config)
        .generate(&options, id, now, &mut RandSource(rng))
        .context("palette generation failed")?;
    info!(
        id = %palette.id,
        palette_type = %palette.metadata.palette_type,
        swatches = palette.metadata.swatches,
        "generated palette"
    );
    Ok(palette_lines(&palette))
}

/// One header line, then `item  hex  hsl  rgb` per swatch.
#[must_use]
pub fn palette_lines(palette: &Palette) -> Vec<String> {
    let mut lines = Vec::with_capacity(palette.items.len() + 1);
    lines.push(format!(
        "# {} ({}, {} swatches, base {})",
        palette.id,
        palette.metadata.palette_type,
        palette.metadata.swatches,
        palette.metadata.base_color
    ));
    for item in &palette.items {
        lines.push(format!(
            "{}  {}  {}  {}",
            item.item_id, item.css.hex, item.css.hsl, item.css.rgb
        ));
    }
    lines
}

// ─── convert ────────────────────────────────────────────────────────────────

pub fn run_convert(args: &ConvertArgs) -> Result<Vec<String>> {
    let value = parse_hex(&args.color)?;
    match args.to {
        Some(space) => Ok(vec![to_css_string(&convert(&value, space)?)]),
        None => ColorSpace::all()
            .iter()
            .map(|&space| -> Result<String> {
                let css = to_css_string(&convert(&value, space)?);
                Ok(format!("{:<5}{css}", space.name()))
            })
            .collect(),
    }
}

// ─── types ──────────────────────────────────────────────────────────────────

#[must_use]
pub fn type_lines() -> Vec<String> {
    PaletteType::all()
        .iter()
        .map(|kind| {
            let range = kind.swatch_range();
            let swatches = if range.start() == range.end() {
                range.start().to_string()
            } else {
                format!("{}-{}", range.start(), range.end())
            };
            format!("{:<21}{swatches}", kind.name())
        })
        .collect()
}
