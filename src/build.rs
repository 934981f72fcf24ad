//! Exports the [`build_site`] function which stitches together the
//! high-level steps of a build: validating the project layout
//! ([`crate::validate`]), rendering posts ([`crate::post`]), running the
//! declared-but-empty page stage, and assembling the front page
//! ([`crate::index`]). The stages run in that fixed order; only a
//! validation failure produces an early exit before anything is written.

use crate::config::SiteConfig;
use crate::index;
use crate::post::{self, Skipped};
use crate::validate;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Options for a single build, as collected from the command line.
pub struct BuildOptions {
    /// The directory to run the build against.
    pub working_dir: PathBuf,

    /// Where to write the rendered site, relative to `working_dir`. Must
    /// already exist.
    pub output: PathBuf,

    /// Accepted for command-line compatibility; nothing in the current
    /// pipeline consults it.
    pub force: bool,

    /// Minify the output HTML. Runs the [`MinifyOutput`] stage, which is
    /// declared but empty.
    pub minify: bool,
}

/// Progress of a build through its fixed stage order. [`State::Failed`] is
/// reachable only from [`State::Validating`]; errors in later stages
/// surface to the caller with the build left in the stage that was
/// running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Validating,
    BuildingPosts,
    BuildingPages,
    BuildingIndex,
    Done,
    Failed,
}

/// What a completed build did: how many posts rendered, and which source
/// files were skipped and why.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub posts_rendered: usize,
    pub skipped: Vec<Skipped>,
}

/// Everything a [`Stage`] gets to see: the validated configuration and the
/// resolved source and output roots.
pub struct StageContext<'a> {
    pub config: &'a SiteConfig,
    pub root: &'a Path,
    pub output: &'a Path,
}

/// A declared unit of build work. Page rendering and minification are
/// stages that do not yet do anything; a real implementation replaces an
/// empty `run` without touching the orchestrator's control flow.
pub trait Stage {
    fn run(&self, ctx: &StageContext) -> Result<()>;
}

/// Static-page rendering. Extension point: iterate a `pages/` directory
/// analogous to `posts/` and render each file through a page layout.
pub struct PageRenderer;

impl Stage for PageRenderer {
    fn run(&self, _ctx: &StageContext) -> Result<()> {
        Ok(())
    }
}

/// Output minification. Extension point: rewrite the HTML files under the
/// output root in place.
pub struct MinifyOutput;

impl Stage for MinifyOutput {
    fn run(&self, _ctx: &StageContext) -> Result<()> {
        Ok(())
    }
}

/// A build in progress. Tracks the current [`State`]; [`Build::run`]
/// advances through the stages in order.
pub struct Build {
    options: BuildOptions,
    state: State,
}

impl Build {
    pub fn new(options: BuildOptions) -> Build {
        Build {
            options,
            state: State::Idle,
        }
    }

    /// The stage the build is currently in (or ended in).
    pub fn state(&self) -> State {
        self.state
    }

    /// Runs the build to completion and reports what it did. The post
    /// collection is threaded from the post pass to the index pass
    /// explicitly; there is no state shared outside this function.
    pub fn run(&mut self) -> Result<BuildReport> {
        let root = self.options.working_dir.clone();
        let output = root.join(&self.options.output);

        self.state = State::Validating;
        let config = match validate::validate(&root, &output) {
            Ok(config) => config,
            Err(err) => {
                self.state = State::Failed;
                return Err(Error::Validate(err));
            }
        };

        info!(
            "Building in folder {} and distributing to {}",
            root.display(),
            output.display()
        );

        self.state = State::BuildingPosts;
        // The layout loads once per build, not once per post.
        let post_layout = read_layout(&config.post_layout(&root))?;
        let (posts, skipped) =
            post::build_posts(&root.join("posts"), &output, &post_layout)?;

        self.state = State::BuildingPages;
        let ctx = StageContext {
            config: &config,
            root: &root,
            output: &output,
        };
        PageRenderer.run(&ctx)?;

        self.state = State::BuildingIndex;
        let index_layout = read_layout(&config.index_layout(&root))?;
        index::build_index(&config, &posts, &index_layout, &output)?;

        if self.options.minify {
            MinifyOutput.run(&ctx)?;
        }

        self.state = State::Done;
        info!("Rendered {} posts", posts.len());
        Ok(BuildReport {
            posts_rendered: posts.len(),
            skipped,
        })
    }
}

/// Builds the site from a [`BuildOptions`]. Constructs a [`Build`], runs
/// it, and returns its report.
pub fn build_site(options: BuildOptions) -> Result<BuildReport> {
    Build::new(options).run()
}

// Loads a layout template's contents for substitution.
fn read_layout(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|err| Error::OpenLayout {
        path: path.to_owned(),
        err,
    })
}

/// The result of a fallible build operation.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site.
#[derive(Debug)]
pub enum Error {
    /// Returned when a validation check fails. Nothing has been written
    /// when this comes back.
    Validate(validate::Error),

    /// Returned for I/O problems opening a layout template.
    OpenLayout { path: PathBuf, err: std::io::Error },

    /// Returned for errors in the post-rendering pass.
    Posts(post::Error),

    /// Returned for errors writing the front page.
    Index(index::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Validate(err) => err.fmt(f),
            Error::OpenLayout { path, err } => {
                write!(f, "Opening layout file '{}': {}", path.display(), err)
            }
            Error::Posts(err) => err.fmt(f),
            Error::Index(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Validate(err) => Some(err),
            Error::OpenLayout { path: _, err } => Some(err),
            Error::Posts(err) => Some(err),
            Error::Index(err) => Some(err),
        }
    }
}

impl From<post::Error> for Error {
    /// Converts [`post::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: post::Error) -> Error {
        Error::Posts(err)
    }
}

impl From<index::Error> for Error {
    /// Converts [`index::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: index::Error) -> Error {
        Error::Index(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const POST_LAYOUT: &str =
        "<html><head><title>{{ Title }}</title></head>\
         <body><p>{{ Date }}</p>{{ Body }}</body></html>";
    const INDEX_LAYOUT: &str =
        "<html><head><title>{{ Title }}</title></head>\
         <body><h1>{{ Title }}</h1>{{ Body }}</body></html>";

    fn scaffold() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("dist")).unwrap();
        fs::create_dir_all(root.join("themes/basic/layouts")).unwrap();
        fs::create_dir_all(root.join("posts")).unwrap();
        fs::create_dir_all(root.join("pages")).unwrap();
        fs::write(
            root.join("config.json"),
            r#"{"title": "My Blog", "theme": "basic"}"#,
        )
        .unwrap();
        fs::write(root.join("themes/basic/layouts/posts.html"), POST_LAYOUT)
            .unwrap();
        fs::write(root.join("themes/basic/layouts/index.html"), INDEX_LAYOUT)
            .unwrap();
        dir
    }

    fn options(root: &Path) -> BuildOptions {
        BuildOptions {
            working_dir: root.to_owned(),
            output: PathBuf::from("dist"),
            force: false,
            minify: false,
        }
    }

    fn write_post(
        root: &Path,
        slug: &str,
        title: &str,
        date: &str,
        draft: bool,
        body: &str,
    ) {
        fs::write(
            root.join("posts").join(format!("{}.md", slug)),
            format!(
                "---\ntitle: {}\npublishDate: {}\ndraft: {}\n---\n\n{}",
                title, date, draft, body
            ),
        )
        .unwrap();
    }

    #[test]
    fn test_build_site_end_to_end() {
        let dir = scaffold();
        write_post(
            dir.path(),
            "hello",
            "Hello",
            "2024-01-01",
            false,
            "**bold** text",
        );
        write_post(
            dir.path(),
            "secret",
            "Secret",
            "2024-06-01",
            true,
            "unpublished",
        );

        let mut build = Build::new(options(dir.path()));
        let report = build.run().unwrap();
        assert_eq!(build.state(), State::Done);
        assert_eq!(report.posts_rendered, 2);
        assert!(report.skipped.is_empty());

        let post =
            fs::read_to_string(dir.path().join("dist/posts/hello.html"))
                .unwrap();
        assert!(post.contains("<strong>bold</strong>"));
        assert!(post.contains("<title>Hello</title>"));
        assert!(post.contains("<p>2024-01-01</p>"));

        // Drafts render to disk but stay off the front page.
        assert!(dir.path().join("dist/posts/secret.html").exists());
        let index =
            fs::read_to_string(dir.path().join("dist/index.html")).unwrap();
        assert!(index.contains("<h2>Hello</h2>"));
        assert!(!index.contains("Secret"));
        assert!(index.contains("<h1>My Blog</h1>"));
    }

    #[test]
    fn test_build_site_validation_failure_writes_nothing() {
        let dir = scaffold();
        fs::remove_dir(dir.path().join("dist")).unwrap();
        write_post(dir.path(), "hello", "Hello", "2024-01-01", false, "text");

        let mut build = Build::new(options(dir.path()));
        let err = build.run().unwrap_err();
        assert_eq!(build.state(), State::Failed);
        assert!(matches!(err, Error::Validate(_)));
        assert!(!dir.path().join("dist").exists());
    }

    #[test]
    fn test_build_site_skips_malformed_post() {
        let dir = scaffold();
        write_post(dir.path(), "good", "Good", "2024-01-01", false, "fine");
        fs::write(dir.path().join("posts/bad.md"), "missing header").unwrap();

        let report = build_site(options(dir.path())).unwrap();
        assert_eq!(report.posts_rendered, 1);
        assert_eq!(report.skipped.len(), 1);
        let index =
            fs::read_to_string(dir.path().join("dist/index.html")).unwrap();
        assert!(index.contains("<h2>Good</h2>"));
    }

    #[test]
    fn test_build_site_missing_layout_is_fatal() {
        let dir = scaffold();
        fs::remove_file(dir.path().join("themes/basic/layouts/posts.html"))
            .unwrap();
        let err = build_site(options(dir.path())).unwrap_err();
        assert!(matches!(err, Error::OpenLayout { .. }));
    }

    #[test]
    fn test_build_site_caps_front_page_at_ten() {
        let dir = scaffold();
        for day in 1..=11 {
            write_post(
                dir.path(),
                &format!("p{:02}", day),
                &format!("Post{:02}", day),
                &format!("2024-03-{:02}", day),
                false,
                "body",
            );
        }

        let report = build_site(options(dir.path())).unwrap();
        assert_eq!(report.posts_rendered, 11);

        let index =
            fs::read_to_string(dir.path().join("dist/index.html")).unwrap();
        assert!(!index.contains("<h2>Post01</h2>"));
        assert!(index.contains("<h2>Post11</h2>"));
        assert!(
            index.find("<h2>Post11</h2>").unwrap()
                < index.find("<h2>Post02</h2>").unwrap()
        );
    }

    #[test]
    fn test_build_site_empty_posts_dir() {
        let dir = scaffold();
        let report = build_site(options(dir.path())).unwrap();
        assert_eq!(report.posts_rendered, 0);
        assert!(dir.path().join("dist/index.html").exists());
    }
}
