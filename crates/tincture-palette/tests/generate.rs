//! Generation contract: swatch counts, constraints, ranges, determinism and
//! per-item round trips, exercised through the public API only.

use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;

use tincture_color::{ColorSpace, Hsl, convert};
use tincture_palette::{
    EngineConfig, Palette, PaletteGenerator, PaletteType, RandSource, SelectedPaletteOptions,
    Xorshift, generate_palette,
};

fn ts() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
}

fn hue_diff(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 { 360.0 - d } else { d }
}

fn all_limits(kind: PaletteType, count: usize) -> SelectedPaletteOptions {
    SelectedPaletteOptions {
        limit_dark: true,
        limit_gray: true,
        limit_light: true,
        ..SelectedPaletteOptions::new(kind, count)
    }
}

#[test]
fn swatch_count_invariant() {
    let mut rng = Xorshift::new(100);
    for &kind in PaletteType::all() {
        for requested in [0, 1, 2, 3, 4, 5, 6, 7, 20] {
            let opts = SelectedPaletteOptions::new(kind, requested);
            let p = generate_palette(&opts, "p", ts(), &mut rng).unwrap();
            let expected = match kind {
                PaletteType::Triadic => 3,
                PaletteType::Tetradic => 4,
                PaletteType::Hexadic => 6,
                _ => requested.clamp(2, 6),
            };
            assert_eq!(p.items.len(), expected, "{kind} requested {requested}");
            assert_eq!(p.metadata.swatches, expected);
        }
    }
}

#[test]
fn constraint_invariant() {
    let config = EngineConfig::default();
    let t = config.thresholds;
    let mut rng = Xorshift::new(2024);
    for &kind in PaletteType::all() {
        for _ in 0..20 {
            let p = generate_palette(&all_limits(kind, 6), "p", ts(), &mut rng).unwrap();
            for item in &p.items {
                let hsl = item.hsl();
                assert!(!t.is_out_of_bounds(&hsl), "{kind}: {hsl}");
            }
        }
    }
}

#[test]
fn single_limits_are_honored() {
    let config = EngineConfig::default();
    let t = config.thresholds;
    let mut rng = Xorshift::new(55);
    for _ in 0..30 {
        let dark = SelectedPaletteOptions {
            limit_dark: true,
            ..SelectedPaletteOptions::new(PaletteType::Monochromatic, 6)
        };
        let p = generate_palette(&dark, "p", ts(), &mut rng).unwrap();
        assert!(p.items.iter().all(|i| !t.is_too_dark(&i.hsl())));

        let light = SelectedPaletteOptions {
            limit_light: true,
            ..SelectedPaletteOptions::new(PaletteType::Analogous, 6)
        };
        let p = generate_palette(&light, "p", ts(), &mut rng).unwrap();
        assert!(p.items.iter().all(|i| !t.is_too_light(&i.hsl())));
    }
}

#[test]
fn every_item_roundtrips_to_its_hsl() {
    let mut rng = Xorshift::new(7);
    for &kind in PaletteType::all() {
        let opts = SelectedPaletteOptions {
            enable_alpha: true,
            ..SelectedPaletteOptions::new(kind, 6)
        };
        let p = generate_palette(&opts, "p", ts(), &mut rng).unwrap();
        for item in &p.items {
            let canonical = item.hsl();
            for &space in ColorSpace::all() {
                let back = convert(&item.colors.get(space), ColorSpace::Hsl).unwrap();
                let tincture_color::ColorValue::Hsl(back) = back else {
                    panic!("not hsl");
                };
                assert!(
                    (back.saturation.get() - canonical.saturation.get()).abs() < 1e-6,
                    "{kind} {space}: {back} vs {canonical}"
                );
                assert!(
                    (back.lightness.get() - canonical.lightness.get()).abs() < 1e-6,
                    "{kind} {space}: {back} vs {canonical}"
                );
                // Partial records carry no hue or alpha.
                if space.is_full() {
                    assert!(
                        hue_diff(back.hue.get(), canonical.hue.get()) < 1e-6,
                        "{kind} {space}: {back} vs {canonical}"
                    );
                    assert_eq!(back.alpha, canonical.alpha, "{kind} {space}");
                }
            }
        }
    }
}

#[test]
fn same_seed_same_palette() {
    for &kind in PaletteType::all() {
        let opts = all_limits(kind, 5);
        let a = generate_palette(&opts, "p", ts(), &mut Xorshift::new(31)).unwrap();
        let b = generate_palette(&opts, "p", ts(), &mut Xorshift::new(31)).unwrap();
        assert_eq!(a, b, "{kind}");

        let seeded = || RandSource(StdRng::seed_from_u64(31));
        let c = generate_palette(&opts, "p", ts(), &mut seeded()).unwrap();
        let d = generate_palette(&opts, "p", ts(), &mut seeded()).unwrap();
        assert_eq!(c, d, "{kind}");
    }
}

#[test]
fn triadic_scenario() {
    let opts = SelectedPaletteOptions {
        custom_base_color: Some(Hsl::new(0.0, 100.0, 50.0).unwrap().into()),
        ..SelectedPaletteOptions::new(PaletteType::Triadic, 3)
    };
    // Zero shift keeps every swatch on the base saturation/lightness, so
    // the pure primaries come out exactly.
    let mut config = EngineConfig::default();
    config.shifts.triadic = tincture_palette::ShiftRange::new(0.0, 0.0);
    let p = PaletteGenerator::new(&config)
        .generate(&opts, "p", ts(), &mut Xorshift::new(1))
        .unwrap();
    let hex: Vec<String> = p.items.iter().map(|i| i.css.hex.clone()).collect();
    assert_eq!(hex, vec!["#ff0000", "#00ff00", "#0000ff"]);
}

#[test]
fn palette_roundtrips_through_toml() {
    let opts = SelectedPaletteOptions {
        enable_alpha: true,
        limit_gray: true,
        ..SelectedPaletteOptions::new(PaletteType::Hexadic, 6)
    };
    let p = generate_palette(&opts, "p-serde", ts(), &mut Xorshift::new(4)).unwrap();
    let text = toml::to_string(&p).unwrap();
    assert!(text.contains("palette_type = \"hexadic\""), "{text}");
    let back: Palette = toml::from_str(&text).unwrap();
    assert_eq!(back, p);
}
