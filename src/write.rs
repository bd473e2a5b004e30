//! Templates the books section and writes it to disk. The toggle control
//! can't change state in a static page, so each [`ViewState`] gets its own
//! page and the control links one to the other:
//!
//! * `{output_directory}/index.html` is the collapsed view
//! * `{output_directory}/all.html` is the expanded view

use crate::config::SectionConfig;
use crate::entry::Entry;
use crate::reveal::{RevealConfig, RevealRegistry, Target};
use crate::section::Section;
use crate::value::{reveal_attributes, Card};
use crate::view::{ShelfView, ViewState};
use gtmpl::{Template, Value};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// The built-in section template, used when the theme doesn't provide one.
pub const DEFAULT_TEMPLATE: &str = include_str!("../theme/books.html");

/// Responsible for templating and writing the section pages to disk from a
/// list of [`Entry`]s.
pub struct Writer<'a> {
    /// The template for section pages.
    pub template: &'a Template,

    /// The directory in which the section pages are written.
    pub output_directory: &'a Path,

    /// The base URL for section pages, i.e., the URL of
    /// `output_directory`. It should end in a trailing slash.
    pub books_url: &'a Url,

    /// The URL for the static assets. This is made available to the
    /// template, typically for the theme's stylesheet and reveal script.
    pub static_url: &'a Url,

    /// The heading, blurb, photo and archive link.
    pub section: &'a SectionConfig,

    /// The number of cards shown in the collapsed view.
    pub fold_limit: usize,

    /// The base reveal config for the title, archive link and cards.
    pub reveal: &'a RevealConfig,
}

impl Writer<'_> {
    /// Writes the collapsed and expanded section pages for `entries`.
    /// Returns the paths of the written files.
    pub fn write_section(&self, entries: &[Entry]) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(self.output_directory)?;
        [ViewState::Collapsed, ViewState::Expanded]
            .iter()
            .map(|&state| {
                let page = self.page(state)?;
                let file_path = self.output_directory.join(page.file_name);
                debug!(
                    path = %file_path.display(),
                    state = ?state,
                    "writing section page"
                );
                let mut file = std::fs::File::create(&file_path)?;
                self.render(entries, &page, &mut file)?;
                Ok(file_path)
            })
            .collect()
    }

    fn page(&self, state: ViewState) -> Result<Page> {
        Ok(Page {
            state,
            file_name: file_name(state),
            toggle_url: self.books_url.join(file_name(state.toggled()))?,
        })
    }

    /// Mounts a [`Section`] in the page's state and renders it into `w`.
    fn render<W: io::Write>(
        &self,
        entries: &[Entry],
        page: &Page,
        w: &mut W,
    ) -> Result<()> {
        let registry = RevealRegistry::new();
        let mut section = Section::mount(
            ShelfView::new(entries, self.fold_limit),
            &registry,
            self.reveal,
        );
        if page.state.is_expanded() {
            section.toggle();
        }

        let value = self.to_value(&section, page);
        self.template
            .execute(w, &gtmpl::Context::from(value)?)?;
        Ok(())
    }

    /// Converts a mounted [`Section`] into a [`Value::Object`] for the
    /// template.
    fn to_value(&self, section: &Section, page: &Page) -> Value {
        let cards: Vec<Value> = section
            .visible()
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                Value::from(&Card {
                    entry,
                    timing: section.view().card_timing(i),
                    reveal: section.pending_reveal(Target::Card(i)),
                })
            })
            .collect();

        let mut m: HashMap<String, Value> = HashMap::new();
        self.section.insert_values(&mut m);
        m.insert(
            "title_reveal".to_owned(),
            reveal_attributes(section.pending_reveal(Target::Title).as_ref()),
        );
        m.insert(
            "archive_reveal".to_owned(),
            reveal_attributes(section.pending_reveal(Target::ArchiveLink).as_ref()),
        );
        m.insert("cards".to_owned(), Value::Array(cards));
        m.insert("expanded".to_owned(), Value::Bool(page.state.is_expanded()));
        m.insert(
            "toggle_label".to_owned(),
            Value::String(section.toggle_label().to_owned()),
        );
        m.insert(
            "toggle_url".to_owned(),
            Value::String(page.toggle_url.to_string()),
        );
        m.insert(
            "static_url".to_owned(),
            Value::String(self.static_url.to_string()),
        );
        Value::Object(m)
    }
}

/// An output HTML file for one [`ViewState`] of the section.
struct Page {
    state: ViewState,

    /// The file name within the output directory.
    file_name: &'static str,

    /// The URL of the page for the other state.
    toggle_url: Url,
}

fn file_name(state: ViewState) -> &'static str {
    match state {
        ViewState::Collapsed => "index.html",
        ViewState::Expanded => "all.html",
    }
}

/// Parses the section template from its source.
pub fn parse_template(source: &str) -> Result<Template> {
    let mut template = Template::default();
    template.parse(source)?;
    Ok(template)
}

/// The result of a fallible page-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug)]
pub enum Error {
    /// An error during templating.
    Template(String),

    /// An error building a page URL.
    UrlParse(url::ParseError),

    /// An error writing the output files.
    Io(io::Error),
}

impl From<io::Error> for Error {
    /// Converts an [`io::Error`] into an [`Error`]. This allows us to use the
    /// `?` operator for fallible I/O operations.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<url::ParseError> for Error {
    /// Converts a [`url::ParseError`] into an [`Error`]. This allows us to use
    /// the `?` operator when joining page URLs.
    fn from(err: url::ParseError) -> Error {
        Error::UrlParse(err)
    }
}

impl From<String> for Error {
    /// Converts a template error message ([`String`]) into an [`Error`]. This
    /// allows us to use the `?` operator for fallible template operations.
    fn from(err: String) -> Error {
        Error::Template(err)
    }
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Template(err) => write!(f, "templating: {}", err),
            Error::UrlParse(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Template(_) => None,
            Error::UrlParse(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}
