//! Command-line arguments and logger setup for quickview.
//!
//! With no arguments `qv` opens the current directory. `--debug` turns on
//! diagnostic output on stderr; `RUST_LOG` still overrides the level.

use clap::Parser;
use log::LevelFilter;

use std::path::PathBuf;

/// Keyboard-driven terminal file browser.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "qv", version, about, long_about = None)]
pub struct Cli {
    /// Directory to open instead of the current one
    pub path: Option<PathBuf>,

    /// Print diagnostic messages to stderr
    #[arg(short, long)]
    pub debug: bool,
}

impl Cli {
    /// Level the logger starts at when `RUST_LOG` is not set.
    pub fn log_level(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Off
        }
    }
}

/// Installs the global logger. Output goes to stderr so it never mixes with
/// the full-screen interface on stdout.
pub fn init_logger(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .parse_default_env();
    if builder.try_init().is_err() {
        log::warn!("logger was already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_debug_flag() -> Result<(), Box<dyn std::error::Error>> {
        let cli = Cli::try_parse_from(["qv", "--debug"])?;
        assert!(cli.debug);
        assert_eq!(cli.log_level(), LevelFilter::Debug);

        let cli = Cli::try_parse_from(["qv", "-d", "/tmp"])?;
        assert!(cli.debug);
        assert_eq!(cli.path, Some(PathBuf::from("/tmp")));

        let cli = Cli::try_parse_from(["qv"])?;
        assert!(!cli.debug);
        assert_eq!(cli.log_level(), LevelFilter::Off);
        Ok(())
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["qv", "--bogus"]).is_err());
    }
}
