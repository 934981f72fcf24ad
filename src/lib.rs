//! The library code for the `quern` static blog builder. A build is a single
//! pass over a project tree and can be broken down into four distinct steps:
//!
//! 1. Validating the project layout and loading the site configuration
//!    ([`crate::validate`], [`crate::config`])
//! 2. Rendering each Markdown post through the post layout
//!    ([`crate::post`])
//! 3. Rendering static pages (a declared stage that does not yet do any
//!    work, see [`crate::build`])
//! 4. Assembling the front page from the rendered posts ([`crate::index`])
//!
//! Of these, the second and fourth steps carry the real logic. The post pass
//! parses every `posts/*.md` file into frontmatter ([`crate::frontmatter`])
//! and a Markdown body, renders the body to HTML ([`crate::markdown`]), and
//! substitutes both into the theme's post layout ([`crate::template`]). The
//! index pass then ranks the collected posts (drafts out, newest first) and
//! builds the front page from the ten most recent.
//!
//! The steps are sequenced by [`crate::build::build_site`], which owns the
//! stage ordering and maps a validation failure to an early exit before
//! anything is written.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod frontmatter;
pub mod index;
pub mod markdown;
pub mod post;
pub mod template;
pub mod validate;
