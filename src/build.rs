//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building the section: parsing the entries ([`crate::parser`]),
//! rendering the section pages ([`crate::write`]) and copying the theme's
//! static directory into the static output directory.

use crate::config::Config;
use crate::parser::{Error as ParseError, Parser as EntryParser};
use crate::util::{copy_dir, rmdir};
use crate::write::{self, Error as WriteError, Writer, DEFAULT_TEMPLATE};
use gtmpl::Template;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

/// Builds the section from a [`Config`] object. This calls into
/// [`EntryParser::parse_entries`] and [`Writer::write_section`] which do the
/// heavy-lifting, then copies the static assets from the theme directory to
/// the output directory.
pub fn build_site(config: &Config) -> Result<()> {
    let parser = EntryParser::new(&config.site_root);
    let entries = parser.parse_entries(&config.books_source_directory)?;

    let template = load_template(&config.books_template)?;

    // Only the directories this tool writes are cleaned; the rest of the
    // output directory may belong to other parts of the site.
    rmdir_annotated(&config.books_output_directory)?;

    let writer = Writer {
        template: &template,
        output_directory: &config.books_output_directory,
        books_url: &config.books_url,
        static_url: &config.static_url,
        section: &config.section,
        fold_limit: config.fold_limit,
        reveal: &config.reveal,
    };
    let written = writer.write_section(&entries)?;
    info!(
        pages = written.len(),
        entries = entries.len(),
        directory = %config.books_output_directory.display(),
        "wrote section"
    );

    if let Some(static_source_directory) = &config.static_source_directory {
        rmdir_annotated(&config.static_output_directory)?;
        copy_dir(static_source_directory, &config.static_output_directory)?;
        info!(
            from = %static_source_directory.display(),
            to = %config.static_output_directory.display(),
            "copied static assets"
        );
    }

    Ok(())
}

/// Loads the template file contents, concatenates them and parses the result
/// into a template. With no template files, the built-in template is used.
fn load_template<P: AsRef<Path>>(template_files: &[P]) -> Result<Template> {
    if template_files.is_empty() {
        return Ok(write::parse_template(DEFAULT_TEMPLATE)?);
    }

    let mut contents = String::new();
    for template_file in template_files {
        use std::io::Read;
        let template_file = template_file.as_ref();
        File::open(template_file)
            .map_err(|e| Error::OpenTemplateFile {
                path: template_file.to_owned(),
                err: e,
            })?
            .read_to_string(&mut contents)?;
        contents.push(' ');
    }

    let mut template = Template::default();
    template.parse(&contents).map_err(Error::ParseTemplate)?;
    Ok(template)
}

fn rmdir_annotated(dir: &Path) -> Result<()> {
    rmdir(dir).map_err(|err| Error::Clean {
        path: dir.to_owned(),
        err,
    })
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building the section. Errors can be during parsing,
/// writing, cleaning output directories, parsing template files, and other
/// I/O.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors during parsing.
    Parse(ParseError),

    /// Returned for errors writing the section pages to disk.
    Write(WriteError),

    /// Returned for I/O problems while cleaning output directories.
    Clean { path: PathBuf, err: std::io::Error },

    /// Returned for I/O problems while opening template files.
    OpenTemplateFile { path: PathBuf, err: std::io::Error },

    /// Returned for errors parsing template files.
    ParseTemplate(String),

    /// Returned for other I/O errors.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Parse(err) => err.fmt(f),
            Error::Write(err) => err.fmt(f),
            Error::Clean { path, err } => {
                write!(f, "Cleaning directory '{}': {}", path.display(), err)
            }
            Error::OpenTemplateFile { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::ParseTemplate(err) => write!(f, "Parsing template: {}", err),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(err) => Some(err),
            Error::Write(err) => Some(err),
            Error::Clean { path: _, err } => Some(err),
            Error::OpenTemplateFile { path: _, err } => Some(err),
            Error::ParseTemplate(_) => None,
            Error::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<ParseError> for Error {
    /// Converts [`ParseError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: ParseError) -> Error {
        Error::Parse(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    fn project() -> std::io::Result<tempfile::TempDir> {
        let project = tempfile::tempdir()?;
        fs::write(
            project.path().join(crate::config::PROJECT_FILE),
            "site_root: https://example.org/\nfold_limit: 1\n",
        )?;
        copy_dir(Path::new("./testdata/books"), &project.path().join("books"))?;
        Ok(project)
    }

    #[test]
    fn test_build_site() -> anyhow::Result<()> {
        let project = project()?;
        let static_dir = project.path().join("theme").join("static");
        fs::create_dir_all(&static_dir)?;
        fs::write(static_dir.join("site.css"), "body {}")?;

        let out = tempfile::tempdir()?;
        fs::create_dir_all(out.path().join("books"))?;
        fs::write(out.path().join("books").join("stale.html"), "")?;
        fs::write(out.path().join("keep.html"), "")?;

        let config = Config::from_directory(project.path(), out.path())?;
        build_site(&config)?;

        let books = out.path().join("books");
        let index = fs::read_to_string(books.join("index.html"))?;
        let all = fs::read_to_string(books.join("all.html"))?;
        assert!(index.contains("Dune"));
        assert!(!index.contains("Sapiens"));
        assert!(all.contains("Sapiens"));
        assert!(!all.contains("Hidden"));
        assert!(!books.join("stale.html").exists());
        assert!(out.path().join("keep.html").exists());
        assert!(out.path().join("static").join("site.css").is_file());
        Ok(())
    }

    #[test]
    fn test_build_site_theme_template() -> anyhow::Result<()> {
        let project = project()?;
        let theme = project.path().join("theme");
        fs::create_dir_all(&theme)?;
        fs::write(theme.join("theme.yaml"), "books_template: [a.html, b.html]\n")?;
        fs::write(theme.join("a.html"), "{{range .cards}}[{{.title}}]{{end}}")?;
        fs::write(theme.join("b.html"), "|{{.toggle_label}}")?;

        let out = tempfile::tempdir()?;
        let config = Config::from_directory(project.path(), out.path())?;
        build_site(&config)?;

        let index = fs::read_to_string(out.path().join("books").join("index.html"))?;
        // the template files are joined with a space
        assert_eq!("[Dune] |Show More", index.trim());
        Ok(())
    }

    #[test]
    fn test_build_site_without_entries() -> anyhow::Result<()> {
        let project = tempfile::tempdir()?;
        fs::write(
            project.path().join(crate::config::PROJECT_FILE),
            "site_root: https://example.org/\n",
        )?;

        let out = tempfile::tempdir()?;
        let config = Config::from_directory(project.path(), out.path())?;
        build_site(&config)?;

        let index = fs::read_to_string(out.path().join("books").join("index.html"))?;
        assert!(index.contains("Show More"));
        assert!(!index.contains("book-title"));
        Ok(())
    }

    #[test]
    fn test_build_site_keeps_static_without_theme_assets() -> anyhow::Result<()> {
        let project = project()?;
        let out = tempfile::tempdir()?;
        let static_dir = out.path().join("static");
        fs::create_dir_all(&static_dir)?;
        fs::write(static_dir.join("site.css"), "body {}")?;

        let config = Config::from_directory(project.path(), out.path())?;
        build_site(&config)?;

        assert!(out.path().join("books").join("index.html").is_file());
        assert_eq!("body {}", fs::read_to_string(static_dir.join("site.css"))?);
        Ok(())
    }

    #[test]
    fn test_missing_template_file() -> anyhow::Result<()> {
        let result = load_template(&[Path::new("/does/not/exist.html")]);
        assert!(matches!(result, Err(Error::OpenTemplateFile { .. })));
        Ok(())
    }
}
