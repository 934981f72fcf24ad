//! Parsing the frontmatter header that introduces every post source file.
//!
//! A post file is structured as follows:
//!
//! 1. Initial frontmatter fence (`---`)
//! 2. YAML metadata with fields `title`, `publishDate`, and optionally
//!    `draft`
//! 3. Terminal frontmatter fence (`---`)
//! 4. Markdown body
//!
//! For example:
//!
//! ```md
//! ---
//! title: Hello, world!
//! publishDate: 2024-01-01
//! draft: false
//! ---
//! # Hello
//!
//! World
//! ```
//!
//! A file with no recognizable header parses to an explicit
//! [`Error::MissingFrontmatter`]; there is no nullable metadata value for
//! downstream code to trip over.

use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt;

/// Per-post metadata parsed from the header block. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Frontmatter {
    /// The title of the post.
    pub title: String,

    /// The publish date. Dates order the front page, newest first.
    #[serde(rename = "publishDate")]
    pub publish_date: NaiveDate,

    /// Drafts are rendered to disk but never listed on the front page.
    /// Absent means `false`.
    #[serde(default)]
    pub draft: bool,
}

/// Splits `input` into parsed [`Frontmatter`] and the remaining Markdown
/// body.
pub fn parse(input: &str) -> Result<(Frontmatter, &str), Error> {
    const FENCE: &str = "---";
    if !input.starts_with(FENCE) {
        return Err(Error::MissingFrontmatter);
    }
    match input[FENCE.len()..].find(FENCE) {
        None => Err(Error::MissingEndFence),
        Some(offset) => {
            let yaml = &input[FENCE.len()..FENCE.len() + offset];
            let body = &input[FENCE.len() + offset + FENCE.len()..];
            Ok((serde_yaml::from_str(yaml)?, body))
        }
    }
}

/// Represents an error parsing a post's frontmatter.
#[derive(Debug)]
pub enum Error {
    /// Returned when a post source file does not begin with the `---`
    /// fence, i.e. it has no frontmatter block at all.
    MissingFrontmatter,

    /// Returned when the starting fence was found but the closing `---`
    /// was not.
    MissingEndFence,

    /// Returned when there was an error parsing the header as YAML.
    Yaml(serde_yaml::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingFrontmatter => {
                write!(f, "post must begin with a `---` frontmatter fence")
            }
            Error::MissingEndFence => write!(f, "missing closing `---`"),
            Error::Yaml(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MissingFrontmatter => None,
            Error::MissingEndFence => None,
            Error::Yaml(err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for [`serde_yaml`] deserialization.
    fn from(err: serde_yaml::Error) -> Error {
        Error::Yaml(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SIMPLE: &str = "---
title: Hello
publishDate: 2024-01-01
---

Today is the first day.";

    #[test]
    fn test_parse_simple() {
        let (frontmatter, body) = parse(SIMPLE).unwrap();
        assert_eq!(frontmatter.title, "Hello");
        assert_eq!(
            frontmatter.publish_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert!(!frontmatter.draft, "draft defaults to false when absent");
        assert_eq!(body.trim(), "Today is the first day.");
    }

    #[test]
    fn test_parse_draft_flag() {
        let input = "---\ntitle: Secret\npublishDate: 2024-06-01\ndraft: true\n---\nshh";
        let (frontmatter, _) = parse(input).unwrap();
        assert!(frontmatter.draft);
    }

    #[test]
    fn test_parse_missing_frontmatter() {
        match parse("# Just a heading\n\nNo header here.") {
            Err(Error::MissingFrontmatter) => {}
            other => panic!("expected MissingFrontmatter, got {:?}", other.map(|(f, _)| f)),
        }
    }

    #[test]
    fn test_parse_missing_end_fence() {
        match parse("---\ntitle: Unterminated\npublishDate: 2024-01-01\n") {
            Err(Error::MissingEndFence) => {}
            other => panic!("expected MissingEndFence, got {:?}", other.map(|(f, _)| f)),
        }
    }

    #[test]
    fn test_parse_bad_yaml() {
        match parse("---\ntitle: [unbalanced\n---\nbody") {
            Err(Error::Yaml(_)) => {}
            other => panic!("expected Yaml error, got {:?}", other.map(|(f, _)| f)),
        }
    }

    #[test]
    fn test_parse_bad_date() {
        match parse("---\ntitle: T\npublishDate: not-a-date\n---\nbody") {
            Err(Error::Yaml(_)) => {}
            other => panic!("expected Yaml error, got {:?}", other.map(|(f, _)| f)),
        }
    }
}
