//! Converts an entry's markdown body into the HTML fragment that is injected
//! into its card.

use pulldown_cmark::*;
use std::fmt;
use url::{ParseError as UrlParseError, Url};

/// The card renders the title as `h3` and the author as `h4`, so headings in
/// the body start below those.
const HEADING_OFFSET: u32 = 4;

/// Converts markdown to HTML, appending the result onto `out`.
///
/// * `site_root` is the base against which relative links in the body are
///   resolved (e.g., `[notes](notes/dune.html)` becomes
///   `https://example.org/notes/dune.html`). It should end in a trailing
///   slash.
/// * `markdown` is the body of the source file (everything after the
///   frontmatter).
pub fn to_html(
    out: &mut String,
    site_root: &Url,
    markdown: &str,
) -> Result<(), Error> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let event_converter = EventConverter { site_root };
    let events = Parser::new_ext(markdown, options)
        .map(|ev| event_converter.convert(ev))
        .collect::<Result<Vec<Event>, UrlParseError>>()?;
    html::push_html(out, events.into_iter());
    Ok(())
}

struct EventConverter<'a> {
    site_root: &'a Url,
}

impl<'a> EventConverter<'a> {
    fn convert_link(&self, dest: &str) -> Result<String, UrlParseError> {
        // fragments and absolute URLs pass through untouched
        if dest.starts_with('#') {
            return Ok(dest.to_owned());
        }
        match Url::parse(dest) {
            Ok(absolute) => Ok(absolute.to_string()),
            Err(UrlParseError::RelativeUrlWithoutBase) => {
                Ok(self.site_root.join(dest)?.to_string())
            }
            Err(e) => Err(e),
        }
    }

    fn convert_tag<'b>(&self, tag: Tag<'b>) -> Result<Tag<'b>, UrlParseError> {
        Ok(match tag {
            Tag::Heading(s) => Tag::Heading((s + HEADING_OFFSET).min(6)),
            Tag::Link(
                link @ (LinkType::Inline
                | LinkType::Reference
                | LinkType::ReferenceUnknown
                | LinkType::Shortcut
                | LinkType::ShortcutUnknown
                | LinkType::Collapsed
                | LinkType::CollapsedUnknown),
                url,
                title,
            ) => Tag::Link(
                link,
                CowStr::Boxed(self.convert_link(&url)?.into_boxed_str()),
                title,
            ),
            _ => tag,
        })
    }

    fn convert<'b>(&self, ev: Event<'b>) -> Result<Event<'b>, UrlParseError> {
        Ok(match ev {
            Event::Start(tag) => Event::Start(self.convert_tag(tag)?),
            Event::End(tag) => Event::End(self.convert_tag(tag)?),
            _ => ev,
        })
    }
}

/// Represents an error converting markdown to HTML.
#[derive(Debug)]
pub enum Error {
    /// Returned when a link in the body can't be resolved against the site
    /// root.
    UrlParse(UrlParseError),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UrlParse(err) => write!(f, "resolving link: {}", err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::UrlParse(err) => Some(err),
        }
    }
}

impl From<UrlParseError> for Error {
    /// Converts a [`url::ParseError`] into an [`Error`]. It allows us to use
    /// the `?` operator for URL parsing and joining functions.
    fn from(err: UrlParseError) -> Error {
        Error::UrlParse(err)
    }
}
