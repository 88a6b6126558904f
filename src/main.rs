// SPDX-License-Identifier: MIT
//
// tincture: constrained color palettes from the command line.
//
// Wires the two library crates to a clap front end:
//
//   tincture-color   → color records, conversions, CSS text
//   tincture-palette → hue strategies, constraints, palette assembly
//
// The front end owns everything impure: the clock (palette timestamps and
// default ids), the OS entropy source behind an unseeded run, and the
// config file. The engine only ever sees values passed in.

use std::process;

use clap::Parser;

mod cli;
mod commands;
mod logging;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = logging::init_logging(cli.verbose) {
        eprintln!("error: failed to initialize logging: {error}");
        process::exit(1);
    }

    let result = match &cli.command {
        Command::Generate(args) => commands::run_generate(args),
        Command::Convert(args) => commands::run_convert(args),
        Command::Types => Ok(commands::type_lines()),
    };

    match result {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            process::exit(1);
        }
    }
}
