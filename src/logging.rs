// SPDX-License-Identifier: MIT
//
// Logging setup: `tracing` events from the engine crates go to stderr
// through a `tracing-subscriber` fmt layer, so palette output on stdout
// stays clean for piping.

use std::io;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Map the `-v` count onto a level. Warnings show by default.
#[must_use]
pub const fn level_from_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the `-v` level
/// when it is set and parses.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let filter = build_env_filter(level_from_verbosity(verbose));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(verbose >= 2)
                .without_time(),
        )
        .try_init()?;
    Ok(())
}

fn build_env_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_from_verbosity(0), LevelFilter::WARN);
        assert_eq!(level_from_verbosity(1), LevelFilter::INFO);
        assert_eq!(level_from_verbosity(2), LevelFilter::DEBUG);
        assert_eq!(level_from_verbosity(9), LevelFilter::TRACE);
    }
}
