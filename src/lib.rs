//! The library code for `readshelf`, which renders the "favorite reads"
//! section of a personal site: a grid of cards for books and other media,
//! each built from a markdown file. The work breaks down into two steps:
//!
//! 1. Parsing entries from source files on disk ([`crate::parser`])
//! 2. Rendering the section into output files on disk ([`crate::write`])
//!
//! The second step is built on a small view-model. A [`view::ShelfView`]
//! shows the first few entries (the fold) until it is expanded, a
//! [`section::Section`] mounts that view and registers one-shot entrance
//! animations for its title, archive link and cards with a
//! [`reveal::RevealRegistry`], and [`icon::Icon`] resolves glyph names to
//! inline SVG. Static pages can't hold state, so the writer renders one page
//! per view state and links the "Show More" / "Show Less" control between
//! them.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod entry;
pub mod icon;
pub mod markdown;
pub mod parser;
pub mod reveal;
pub mod section;
pub mod view;
pub mod write;

mod util;
mod value;
