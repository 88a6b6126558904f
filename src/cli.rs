// SPDX-License-Identifier: MIT
//
// Command-line argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use tincture_color::ColorSpace;
use tincture_palette::{DistributionType, PaletteType};

#[derive(Parser)]
#[command(
    name = "tincture",
    version,
    about = "Generate constrained color palettes and convert colors between spaces"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a palette and print one line per swatch.
    Generate(GenerateArgs),

    /// Print the CSS text of a hex color in one or every space.
    Convert(ConvertArgs),

    /// List palette types with their swatch ranges.
    Types,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Palette type (complementary, triadic, tetradic, analogous,
    /// split-complementary, hexadic, diadic, monochromatic, random).
    #[arg(short = 't', long = "type", default_value = "complementary")]
    pub palette_type: PaletteType,

    /// Requested swatch count; clamped to the range of the palette type.
    #[arg(short = 'n', long, default_value_t = 5)]
    pub count: usize,

    /// Base color as `#rrggbb` (a random base is drawn when omitted).
    #[arg(short, long, value_name = "HEX")]
    pub base: Option<String>,

    /// Hue-offset distribution (base, soft, strong, chaotic).
    #[arg(short, long, default_value = "base")]
    pub distribution: DistributionType,

    /// Reject swatches that are too dark.
    #[arg(long)]
    pub limit_dark: bool,

    /// Reject swatches that are too gray.
    #[arg(long)]
    pub limit_gray: bool,

    /// Reject swatches that are too light.
    #[arg(long)]
    pub limit_light: bool,

    /// Give every swatch a random alpha channel.
    #[arg(long)]
    pub alpha: bool,

    /// Seed for a reproducible palette.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Engine config file (TOML).
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Palette id (default: palette-<unix millis>).
    #[arg(long)]
    pub id: Option<String>,
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Color as `#rrggbb` or `#rrggbbaa`; the leading `#` may be omitted.
    #[arg(value_name = "HEX")]
    pub color: String,

    /// Target space (cmyk, hex, hsl, hsv, lab, rgb, sl, sv, xyz). Every space when omitted.
    #[arg(long = "to", value_name = "SPACE")]
    pub to: Option<ColorSpace>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_flags_parse() {
        let cli = Cli::try_parse_from([
            "tincture",
            "-vv",
            "generate",
            "--type",
            "split-complementary",
            "-n",
            "4",
            "--limit-gray",
            "--seed",
            "9",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.palette_type, PaletteType::SplitComplementary);
        assert_eq!(args.count, 4);
        assert!(args.limit_gray && !args.limit_dark);
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.distribution, DistributionType::Base);
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(Cli::try_parse_from(["tincture", "generate", "--type", "pentadic"]).is_err());
    }

    #[test]
    fn convert_target_parses() {
        let cli = Cli::try_parse_from(["tincture", "convert", "ff0000", "--to", "lab"]).unwrap();
        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.to, Some(ColorSpace::Lab));
    }
}
