//! Project-layout validation, run before any output is produced.
//!
//! Checks run in a fixed order and stop at the first failure: the output
//! directory, the `themes/`, `posts/`, and `pages/` directories, the
//! presence and shape of `config.json`, and finally the configured theme
//! directory. Later checks depend on state established by earlier ones
//! (the theme check needs the parsed configuration), so nothing runs past
//! the first failure.

use crate::config::{self, SiteConfig};
use std::fmt;
use std::path::{Path, PathBuf};

/// Validates the project tree rooted at `root` and returns the parsed
/// [`SiteConfig`] on success. `output` is the resolved output directory,
/// which must already exist. Each failure carries a specific,
/// human-readable reason; mapping it to a process exit status is the
/// caller's business.
pub fn validate(root: &Path, output: &Path) -> Result<SiteConfig, Error> {
    if !output.is_dir() {
        return Err(Error::MissingOutputDir(output.to_owned()));
    }
    if !root.join("themes").is_dir() {
        return Err(Error::MissingThemesDir);
    }
    if !root.join("posts").is_dir() {
        return Err(Error::MissingPostsDir);
    }
    if !root.join("pages").is_dir() {
        return Err(Error::MissingPagesDir);
    }
    if !root.join(config::FILE_NAME).is_file() {
        return Err(Error::MissingConfig);
    }
    let config = SiteConfig::load(root).map_err(Error::Config)?;
    if !config.theme_dir(root).is_dir() {
        return Err(Error::MissingTheme(config.theme.clone()));
    }
    Ok(config)
}

/// Represents a failed validation check. One variant per check, so a
/// failure always names the check that tripped it.
#[derive(Debug)]
pub enum Error {
    /// Returned when the declared output directory does not exist.
    MissingOutputDir(PathBuf),

    /// Returned when the `themes` directory is missing.
    MissingThemesDir,

    /// Returned when the `posts` directory is missing.
    MissingPostsDir,

    /// Returned when the `pages` directory is missing.
    MissingPagesDir,

    /// Returned when `config.json` is missing.
    MissingConfig,

    /// Returned when `config.json` exists but can't be read or parsed.
    Config(config::Error),

    /// Returned when the configured theme names no directory under
    /// `themes/`.
    MissingTheme(String),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingOutputDir(path) => {
                write!(f, "Output folder '{}' does not exist", path.display())
            }
            Error::MissingThemesDir => write!(f, "themes folder is missing"),
            Error::MissingPostsDir => write!(f, "posts folder is missing"),
            Error::MissingPagesDir => write!(f, "pages folder is missing"),
            Error::MissingConfig => write!(f, "config.json file is missing"),
            Error::Config(err) => {
                write!(f, "Error while reading config: {}", err)
            }
            Error::MissingTheme(theme) => {
                write!(f, "Theme folder '{}' does not exist", theme)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(err) => Some(err),
            _ => None,
        }
    }
}
