//! Defines the [`Post`] record and the per-post rendering pass: scanning
//! the posts directory, parsing each source file, rendering its body, and
//! writing the templated result to the output tree.

use crate::frontmatter::{self, Frontmatter};
use crate::markdown;
use crate::template;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const MARKDOWN_EXTENSION: &str = ".md";

/// One rendered post: where it came from, its parsed metadata, and the
/// HTML derived from its Markdown body. The collection of these records is
/// built up by [`build_posts`] and only ever read afterwards.
#[derive(Debug, Clone)]
pub struct Post {
    /// Path of the source file under the posts directory.
    pub source_path: PathBuf,

    /// The source file name with its extension stripped; names the output
    /// file `posts/<slug>.html`.
    pub slug: String,

    /// Metadata from the file's header block.
    pub frontmatter: Frontmatter,

    /// The Markdown body rendered to HTML.
    pub body: String,
}

impl Post {
    /// The HTML fragment listed for this post on the front page. The whole
    /// rendered body is used; there is no truncation.
    pub fn excerpt(&self) -> &str {
        &self.body
    }
}

/// A post source file that was skipped because its header failed to parse.
/// Skips are collected into the build report so a malformed post neither
/// aborts the build nor vanishes without trace.
#[derive(Debug)]
pub struct Skipped {
    /// Path of the offending source file.
    pub path: PathBuf,

    /// Why it failed to parse.
    pub reason: frontmatter::Error,
}

impl fmt::Display for Skipped {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// Renders every `.md` file directly under `posts_dir` (non-recursive, in
/// directory enumeration order) through the post layout and writes
/// `<output>/posts/<slug>.html` for each. Returns the collected [`Post`]
/// records together with the files that were skipped.
///
/// The layout is passed in pre-loaded; it is read once per build, not once
/// per file. A file whose header fails to parse is skipped with a warning
/// naming the path. Read and write failures abort the pass.
pub fn build_posts(
    posts_dir: &Path,
    output_dir: &Path,
    layout: &str,
) -> Result<(Vec<Post>, Vec<Skipped>), Error> {
    let out_posts = output_dir.join("posts");
    fs::create_dir_all(&out_posts).map_err(|err| Error::CreateDir {
        path: out_posts.clone(),
        err,
    })?;

    let mut posts = Vec::new();
    let mut skipped = Vec::new();
    for result in fs::read_dir(posts_dir)? {
        let entry = result?;
        let os_file_name = entry.file_name();
        let file_name = os_file_name.to_string_lossy();
        if !file_name.ends_with(MARKDOWN_EXTENSION) {
            continue;
        }

        let path = entry.path();
        let contents = fs::read_to_string(&path).map_err(|err| Error::Read {
            path: path.clone(),
            err,
        })?;

        let (frontmatter, body) = match frontmatter::parse(&contents) {
            Ok(parsed) => parsed,
            Err(reason) => {
                warn!("skipping post '{}': {}", path.display(), reason);
                skipped.push(Skipped { path, reason });
                continue;
            }
        };

        let post = Post {
            slug: file_name.trim_end_matches(MARKDOWN_EXTENSION).to_owned(),
            source_path: path,
            body: markdown::to_html(body),
            frontmatter,
        };

        let html = template::render(
            layout,
            &[
                ("Body", post.body.as_str()),
                ("Title", post.frontmatter.title.as_str()),
                ("Date", &post.frontmatter.publish_date.to_string()),
            ],
        );
        let target = out_posts.join(format!("{}.html", post.slug));
        fs::write(&target, html).map_err(|err| Error::Write { path: target, err })?;

        posts.push(post);
    }

    Ok((posts, skipped))
}

/// Represents an error in the post-rendering pass. Parse failures are not
/// errors here; they are reported per-file as [`Skipped`].
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O problems creating the output posts directory.
    CreateDir { path: PathBuf, err: std::io::Error },

    /// Returned for I/O problems reading a post source file.
    Read { path: PathBuf, err: std::io::Error },

    /// Returned for I/O problems writing a rendered post.
    Write { path: PathBuf, err: std::io::Error },

    /// Returned for I/O problems enumerating the posts directory.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::CreateDir { path, err } => {
                write!(f, "Creating directory '{}': {}", path.display(), err)
            }
            Error::Read { path, err } => {
                write!(f, "Reading post '{}': {}", path.display(), err)
            }
            Error::Write { path, err } => {
                write!(f, "Writing post '{}': {}", path.display(), err)
            }
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::CreateDir { path: _, err } => Some(err),
            Error::Read { path: _, err } => Some(err),
            Error::Write { path: _, err } => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Converts a [`std::io::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for fallible I/O functions.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}
