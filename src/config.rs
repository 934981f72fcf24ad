use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// File name of the site configuration, relative to the working directory.
pub const FILE_NAME: &str = "config.json";

/// Global site settings from `config.json`. Loaded once per build and
/// read-only afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// The site title, substituted into the index layout's `Title` token.
    pub title: String,

    /// Name of the active theme, a directory under `themes/` holding the
    /// post and index layouts.
    pub theme: String,
}

impl SiteConfig {
    /// Reads and parses `config.json` from the working directory `root`.
    pub fn load(root: &Path) -> Result<SiteConfig, Error> {
        let file = File::open(root.join(FILE_NAME))?;
        Ok(serde_json::from_reader(file)?)
    }

    /// The configured theme directory under the themes root.
    pub fn theme_dir(&self, root: &Path) -> PathBuf {
        root.join("themes").join(&self.theme)
    }

    /// Path of the theme's post layout template.
    pub fn post_layout(&self, root: &Path) -> PathBuf {
        self.theme_dir(root).join("layouts").join("posts.html")
    }

    /// Path of the theme's index layout template.
    pub fn index_layout(&self, root: &Path) -> PathBuf {
        self.theme_dir(root).join("layouts").join("index.html")
    }
}

/// Represents an error loading the site configuration.
#[derive(Debug)]
pub enum Error {
    /// Returned when the configuration file can't be read.
    Io(std::io::Error),

    /// Returned when the configuration file isn't valid JSON or doesn't
    /// match the expected shape.
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(f),
            Error::Json(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Converts a [`std::io::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for fallible I/O functions.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::Json(err)
    }
}
