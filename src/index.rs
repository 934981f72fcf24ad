//! Front-page assembly: selecting, ordering, and excerpting posts into the
//! index layout. This is the only step that looks at the post collection
//! as a whole, so it runs after every post has been rendered.

use crate::config::SiteConfig;
use crate::post::Post;
use crate::template;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Number of posts listed on the front page.
pub const PAGE_SIZE: usize = 10;

/// Builds the front-page HTML from the full post collection. Drafts drop
/// out, the rest are ordered by publish date (newest first, equal dates
/// broken by title), and at most [`PAGE_SIZE`] posts make the page, each as
/// an `<h2>` heading followed by its excerpt. Fewer than [`PAGE_SIZE`]
/// eligible posts is fine; the page just lists what there is.
pub fn assemble(config: &SiteConfig, posts: &[Post], layout: &str) -> String {
    let mut selected: Vec<&Post> =
        posts.iter().filter(|p| !p.frontmatter.draft).collect();
    selected.sort_by(|a, b| {
        b.frontmatter
            .publish_date
            .cmp(&a.frontmatter.publish_date)
            .then_with(|| a.frontmatter.title.cmp(&b.frontmatter.title))
    });

    let mut body = String::new();
    for post in selected.into_iter().take(PAGE_SIZE) {
        body.push_str("<h2>");
        body.push_str(&post.frontmatter.title);
        body.push_str("</h2>\n");
        body.push_str(post.excerpt());
        body.push('\n');
    }

    template::render(layout, &[("Title", &config.title), ("Body", &body)])
}

/// Assembles the front page and writes it to `<output>/index.html`.
pub fn build_index(
    config: &SiteConfig,
    posts: &[Post],
    layout: &str,
    output_dir: &Path,
) -> Result<(), Error> {
    let target = output_dir.join("index.html");
    fs::write(&target, assemble(config, posts, layout))
        .map_err(|err| Error::Write { path: target, err })
}

/// Represents an error writing the front page.
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O problems writing `index.html`.
    Write { path: PathBuf, err: std::io::Error },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Write { path, err } => {
                write!(f, "Writing index '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Write { path: _, err } => Some(err),
        }
    }
}
