//! Defines the [`Parser`] and [`Error`] types: the logic for reading
//! [`Entry`] objects from markdown source files on disk.

use std::{
    fmt,
    fs::File,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{de::Error as _, Deserialize, Deserializer};
use std::collections::HashSet;
use tracing::{debug, info, warn};
use url::Url;
use walkdir::WalkDir;

use crate::{entry::Entry, markdown};

const MARKDOWN_EXTENSION: &str = "md";

/// Parses [`Entry`] objects from source files.
pub struct Parser<'a> {
    /// `site_root` is the base URL of the site. Relative links inside entry
    /// bodies are resolved against it.
    site_root: &'a Url,
}

impl<'a> Parser<'a> {
    /// Constructs a new parser. See fields on [`Parser`] for argument
    /// descriptions.
    pub fn new(site_root: &'a Url) -> Parser<'a> {
        Parser { site_root }
    }

    /// Searches `source_directory` (recursively) for entry files (extension
    /// `.md`) and returns the list of [`Entry`] objects to display: entries
    /// with `showInBooks: false` are dropped and the rest are ordered with
    /// favorites first, then most recent first. Each entry file must be
    /// structured as follows:
    ///
    /// 1. Initial frontmatter fence (`---`)
    /// 2. YAML frontmatter with field `title` and optionally `author`,
    ///    `external`, `tags`, `fav`, `date` and `showInBooks`
    /// 3. Terminal frontmatter fence (`---`)
    /// 4. Entry body (markdown)
    ///
    /// For example:
    ///
    /// ```md
    /// ---
    /// title: Dune
    /// author: Frank Herbert
    /// external: https://en.wikipedia.org/wiki/Dune_(novel)
    /// tags: [sci-fi, classic]
    /// fav: true
    /// date: 2021-04-16
    /// ---
    /// Politics, ecology and sandworms.
    /// ```
    ///
    /// `date` may also be a full timestamp (`2021-04-16T08:30:00Z`); only its
    /// date part is kept. A missing `source_directory` yields no entries.
    /// Entries whose ids collide get a numeric suffix (`dune`, `dune-2`).
    pub fn parse_entries(&self, source_directory: &Path) -> Result<Vec<Entry>> {
        if !source_directory.exists() {
            debug!(
                directory = %source_directory.display(),
                "entry directory doesn't exist"
            );
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        let mut ids = HashSet::new();
        let mut hidden = 0;
        for result in WalkDir::new(source_directory).sort_by_file_name() {
            let dir_entry = result?;
            let path = dir_entry.path();
            if !dir_entry.file_type().is_file()
                || path.extension().map_or(true, |ext| ext != MARKDOWN_EXTENSION)
            {
                continue;
            }

            match self.parse_entry(path)? {
                Some(mut entry) => {
                    entry.id = unique_id(&mut ids, entry.id, path);
                    entries.push(entry);
                }
                None => {
                    debug!(path = %path.display(), "skipping hidden entry");
                    hidden += 1;
                }
            }
        }

        entries.sort_by(Entry::display_order);
        info!(
            directory = %source_directory.display(),
            entries = entries.len(),
            hidden,
            "parsed entries"
        );
        Ok(entries)
    }

    /// Parses a single [`Entry`] from a source file. Returns `None` if the
    /// entry opts out of display.
    fn parse_entry(&self, path: &Path) -> Result<Option<Entry>> {
        match self._parse_entry(path) {
            Ok(entry) => Ok(entry),
            Err(e) => Err(Error::Annotated(
                format!("parsing entry `{}`", path.display()),
                Box::new(e),
            )),
        }
    }

    fn _parse_entry(&self, path: &Path) -> Result<Option<Entry>> {
        use std::io::Read;
        let mut contents = String::new();
        File::open(path)?.read_to_string(&mut contents)?;
        let input: &str = &contents;

        let (yaml_start, yaml_stop, body_start) = frontmatter_indices(input)?;
        let frontmatter: Frontmatter =
            serde_yaml::from_str(&input[yaml_start..yaml_stop])?;
        if !frontmatter.show_in_books {
            return Ok(None);
        }

        let mut entry = Entry {
            id: entry_id(path)?,
            title: frontmatter.title,
            author: frontmatter.author.filter(|a| !a.trim().is_empty()),
            external: frontmatter
                .external
                .filter(|e| !e.trim().is_empty())
                .map(|e| Url::parse(e.trim()))
                .transpose()?,
            tags: frontmatter.tags.unwrap_or_default(),
            fav: frontmatter.fav,
            date: frontmatter.date,
            body: String::default(),
        };

        markdown::to_html(&mut entry.body, self.site_root, &input[body_start..])?;
        Ok(Some(entry))
    }
}

/// Splits a source file into its frontmatter and body. Returns the start and
/// end of the YAML and the start of the body.
fn frontmatter_indices(input: &str) -> Result<(usize, usize, usize)> {
    const FENCE: &str = "---";
    if !input.starts_with(FENCE) {
        return Err(Error::FrontmatterMissingStartFence);
    }
    match input[FENCE.len()..].find(FENCE) {
        None => Err(Error::FrontmatterMissingEndFence),
        Some(offset) => Ok((
            FENCE.len(),                        // yaml_start
            FENCE.len() + offset,               // yaml_stop
            FENCE.len() + offset + FENCE.len(), // body_start
        )),
    }
}

/// Returns `id`, or `id` with the smallest numeric suffix that hasn't been
/// taken yet, and records the result in `taken`.
fn unique_id(taken: &mut HashSet<String>, id: String, path: &Path) -> String {
    if taken.insert(id.clone()) {
        return id;
    }
    let unique = (2..)
        .map(|n| format!("{}-{}", id, n))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_default();
    warn!(path = %path.display(), id = %id, unique = %unique, "duplicate entry id");
    taken.insert(unique.clone());
    unique
}

/// The id of an entry is the slug of its file stem, or of its directory name
/// for `{name}/index.md` bundles.
fn entry_id(path: &Path) -> Result<String> {
    let stem = match path.file_stem().and_then(|s| s.to_str()) {
        Some("index") => path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str()),
        stem => stem,
    };
    stem.map(slug::slugify)
        .ok_or_else(|| InvalidFileNameError(path.to_owned()).into())
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
struct Frontmatter {
    /// The title of the entry.
    title: String,

    #[serde(default)]
    author: Option<String>,

    /// Parsed as a string so that an empty value means "no link".
    #[serde(default)]
    external: Option<String>,

    #[serde(default)]
    tags: Option<Vec<String>>,

    #[serde(default)]
    fav: bool,

    #[serde(default, deserialize_with = "deserialize_date")]
    date: Option<NaiveDate>,

    /// Entries are shown unless this is explicitly `false`.
    #[serde(default = "default_show_in_books")]
    show_in_books: bool,
}

fn default_show_in_books() -> bool {
    true
}

/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp, or a zone-less
/// `YYYY-MM-DD[T ]HH:MM:SS` timestamp, keeping the date as written.
fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = match Option::<String>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(s) => s,
    };
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(s) {
        return Ok(Some(date_time.naive_local().date()));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .map(|date_time| Some(date_time.date()))
        .ok_or_else(|| D::Error::custom(format!("invalid date `{}`", s)))
}

#[derive(Debug)]
pub struct InvalidFileNameError(PathBuf);

impl fmt::Display for InvalidFileNameError {
    /// Displays an [`InvalidFileNameError`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid file name: {:?}", &self.0)
    }
}

impl std::error::Error for InvalidFileNameError {}

/// Represents the result of an [`Entry`]-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing an [`Entry`] object.
#[derive(Debug)]
pub enum Error {
    /// Returned when an entry source file is missing its starting
    /// frontmatter fence (`---`).
    FrontmatterMissingStartFence,

    /// Returned when an entry source file is missing its terminal
    /// frontmatter fence (`---` i.e., the starting fence was found but the
    /// ending one was missing).
    FrontmatterMissingEndFence,

    /// Returned when there was an error parsing the frontmatter as YAML.
    DeserializeYaml(serde_yaml::Error),

    /// Returned when the `external` link or a body link isn't a valid URL.
    UrlParse(url::ParseError),

    /// Returned for other I/O errors.
    Io(std::io::Error),

    /// Returned for WalkDir I/O errors.
    WalkDir(walkdir::Error),

    /// Returned when a source file name isn't valid UTF-8.
    InvalidFileName(InvalidFileNameError),

    /// An error with an annotation.
    Annotated(String, Box<Error>),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::FrontmatterMissingStartFence => {
                write!(f, "Entry must begin with `---`")
            }
            Error::FrontmatterMissingEndFence => {
                write!(f, "Missing closing `---`")
            }
            Error::DeserializeYaml(err) => err.fmt(f),
            Error::UrlParse(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
            Error::WalkDir(err) => err.fmt(f),
            Error::InvalidFileName(err) => err.fmt(f),
            Error::Annotated(annotation, err) => {
                write!(f, "{}: {}", &annotation, err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FrontmatterMissingStartFence => None,
            Error::FrontmatterMissingEndFence => None,
            Error::DeserializeYaml(err) => Some(err),
            Error::UrlParse(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::InvalidFileName(err) => Some(err),
            Error::Annotated(_, err) => Some(err),
        }
    }
}

impl From<InvalidFileNameError> for Error {
    fn from(err: InvalidFileNameError) -> Error {
        Error::InvalidFileName(err)
    }
}

impl From<markdown::Error> for Error {
    fn from(err: markdown::Error) -> Error {
        match err {
            markdown::Error::UrlParse(e) => Error::UrlParse(e),
        }
    }
}

impl From<url::ParseError> for Error {
    /// Converts a [`url::ParseError`] into an [`Error`]. It allows us to use
    /// the `?` operator for URL parsing and joining functions.
    fn from(err: url::ParseError) -> Error {
        Error::UrlParse(err)
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

impl From<walkdir::Error> for Error {
    /// Converts a [`walkdir::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator while walking the source directory.
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts a [`std::io::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for fallible I/O functions.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}
