//! Runtime configuration of quickview.
//!
//! There is no configuration file. [Config] is built once in `main` from the
//! command line and handed to the controller.

use crate::core::ContentLimits;
use crate::utils::cli::Cli;

use std::io;
use std::path::{Path, PathBuf};

/// Number of entries read for a directory preview.
pub const PREVIEW_CAP: usize = 100;

#[derive(Debug, Clone)]
pub struct Config {
    debug: bool,
    start_dir: PathBuf,
    limits: ContentLimits,
    preview_cap: usize,
}

impl Config {
    pub fn new(start_dir: PathBuf) -> Self {
        Self {
            debug: false,
            start_dir,
            limits: ContentLimits::default(),
            preview_cap: PREVIEW_CAP,
        }
    }

    /// Builds the configuration from parsed arguments. The start directory is
    /// the given path made absolute, or the current directory.
    pub fn from_cli(cli: &Cli) -> io::Result<Self> {
        let cwd = std::env::current_dir()?;
        let start_dir = match &cli.path {
            Some(path) => {
                let joined = cwd.join(path);
                if !joined.is_dir() {
                    return Err(io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("'{}' is not a directory", path.display()),
                    ));
                }
                joined.canonicalize().unwrap_or(joined)
            }
            None => cwd,
        };
        Ok(Self::new(start_dir).with_debug(cli.debug))
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_limits(mut self, limits: ContentLimits) -> Self {
        self.limits = limits;
        self
    }

    // Getters

    #[inline]
    pub fn debug(&self) -> bool {
        self.debug
    }

    #[inline]
    pub fn start_dir(&self) -> &Path {
        &self.start_dir
    }

    #[inline]
    pub fn limits(&self) -> ContentLimits {
        self.limits
    }

    #[inline]
    pub fn preview_cap(&self) -> usize {
        self.preview_cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn from_cli_resolves_the_start_directory() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let cli = Cli {
            path: Some(tmp.path().to_path_buf()),
            debug: true,
        };
        let config = Config::from_cli(&cli)?;
        assert!(config.debug());
        assert_eq!(config.start_dir(), tmp.path().canonicalize()?);
        assert_eq!(config.limits(), ContentLimits::default());
        Ok(())
    }

    #[test]
    fn from_cli_rejects_files() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let file = tmp.path().join("plain.txt");
        std::fs::write(&file, "x")?;
        let cli = Cli {
            path: Some(file),
            debug: false,
        };
        assert!(Config::from_cli(&cli).is_err());
        Ok(())
    }
}
