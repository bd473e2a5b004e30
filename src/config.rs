//! Loads the project configuration from `readshelf.yaml` and the optional
//! theme configuration from `theme/theme.yaml`.

use crate::reveal::RevealConfig;
use crate::util::open;
use crate::view::DEFAULT_FOLD_LIMIT;
use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// The name of the project file.
pub const PROJECT_FILE: &str = "readshelf.yaml";

#[derive(Deserialize)]
struct FoldLimit(usize);
impl Default for FoldLimit {
    fn default() -> Self {
        FoldLimit(DEFAULT_FOLD_LIMIT)
    }
}

#[derive(Deserialize)]
struct Project {
    site_root: Url,

    #[serde(default = "default_heading")]
    heading: String,

    #[serde(default = "default_blurb")]
    blurb: String,

    #[serde(default = "default_archive_link")]
    archive_link: String,

    #[serde(default)]
    fold_limit: FoldLimit,

    #[serde(default)]
    photo: Option<ProjectPhoto>,

    #[serde(default)]
    reveal: RevealConfig,
}

fn default_heading() -> String {
    String::from("Bits and Pieces")
}

fn default_blurb() -> String {
    String::from(
        "A collection of books and other media that I've enjoyed lately or \
         have inspired me.",
    )
}

fn default_archive_link() -> String {
    String::from("archive")
}

#[derive(Deserialize)]
struct ProjectPhoto {
    src: String,
    #[serde(default)]
    alt: String,
    #[serde(default)]
    link: Option<Url>,
}

#[derive(Deserialize)]
struct Theme {
    #[serde(default)]
    books_template: Vec<PathBuf>,
}

/// A photo shown above the grid, optionally linking elsewhere.
#[derive(Clone, Debug, PartialEq)]
pub struct Photo {
    pub src: Url,
    pub alt: String,
    pub link: Option<Url>,
}

/// The static text and links of the section, i.e., everything but the cards.
#[derive(Clone, Debug)]
pub struct SectionConfig {
    pub heading: String,
    pub blurb: String,
    pub archive_url: Url,
    pub photo: Option<Photo>,
}

pub struct Config {
    pub site_root: Url,
    pub books_source_directory: PathBuf,
    pub books_url: Url,
    pub books_output_directory: PathBuf,

    /// Template files concatenated into the section template. Empty means
    /// the built-in template.
    pub books_template: Vec<PathBuf>,

    pub static_source_directory: Option<PathBuf>,
    pub static_output_directory: PathBuf,
    pub static_url: Url,
    pub section: SectionConfig,
    pub fold_limit: usize,
    pub reveal: RevealConfig,
}

impl Config {
    /// Searches `dir` and then each of its ancestors for a project file and
    /// loads the first one found.
    pub fn from_directory(dir: &Path, output_directory: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            match Config::from_project_file(&path, output_directory) {
                Ok(config) => Ok(config),
                Err(e) => Err(anyhow!("Loading configuration: {:?}", e)),
            }
        } else {
            match dir.parent() {
                Some(parent) => Config::from_directory(parent, output_directory),
                None => Err(anyhow!(
                    "Could not find `{}` in any parent directory",
                    PROJECT_FILE
                )),
            }
        }
    }

    pub fn from_project_file(path: &Path, output_directory: &Path) -> Result<Config> {
        let project: Project = serde_yaml::from_reader(open(path, "project")?)?;
        let project_root = path.parent().ok_or_else(|| {
            anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )
        })?;

        let theme_dir = project_root.join("theme");
        let theme_file = theme_dir.join("theme.yaml");
        let theme = if theme_file.exists() {
            serde_yaml::from_reader(open(&theme_file, "theme")?)?
        } else {
            Theme {
                books_template: Vec::new(),
            }
        };
        let static_source_directory = theme_dir.join("static");

        let site_root = directory_url(project.site_root);
        Ok(Config {
            books_source_directory: project_root.join("books"),
            books_url: site_root.join("books/")?,
            books_output_directory: output_directory.join("books"),
            books_template: theme
                .books_template
                .iter()
                .map(|relpath| theme_dir.join(relpath))
                .collect(),
            static_source_directory: match static_source_directory.is_dir() {
                true => Some(static_source_directory),
                false => None,
            },
            static_output_directory: output_directory.join("static"),
            static_url: site_root.join("static/")?,
            section: SectionConfig {
                heading: project.heading,
                blurb: project.blurb,
                archive_url: site_root.join(&project.archive_link)?,
                photo: match project.photo {
                    None => None,
                    Some(photo) => Some(Photo {
                        src: site_root.join(&photo.src)?,
                        alt: photo.alt,
                        link: photo.link,
                    }),
                },
            },
            fold_limit: project.fold_limit.0,
            reveal: project.reveal,
            site_root,
        })
    }
}

/// Makes sure `url` ends in a slash so that [`Url::join`] treats it as a
/// directory rather than dropping its last path segment.
fn directory_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    #[test]
    fn test_from_directory_searches_parents() -> Result<()> {
        let project = tempfile::tempdir()?;
        fs::write(
            project.path().join(PROJECT_FILE),
            "site_root: https://example.org/me\nfold_limit: 4\n",
        )?;
        let nested = project.path().join("books").join("deep");
        fs::create_dir_all(&nested)?;

        let config = Config::from_directory(&nested, Path::new("/tmp/out"))?;
        assert_eq!("https://example.org/me/", config.site_root.as_str());
        assert_eq!("https://example.org/me/books/", config.books_url.as_str());
        assert_eq!(
            "https://example.org/me/archive",
            config.section.archive_url.as_str()
        );
        assert_eq!(4, config.fold_limit);
        assert_eq!("Bits and Pieces", config.section.heading);
        assert_eq!(project.path().join("books"), config.books_source_directory);
        assert_eq!(Path::new("/tmp/out/books"), config.books_output_directory);
        assert!(config.books_template.is_empty());
        assert_eq!(None, config.static_source_directory);
        assert_eq!(RevealConfig::default(), config.reveal);
        Ok(())
    }

    #[test]
    fn test_from_project_file_with_theme() -> Result<()> {
        let project = tempfile::tempdir()?;
        let theme = project.path().join("theme");
        fs::create_dir_all(theme.join("static"))?;
        fs::write(theme.join("theme.yaml"), "books_template: [books.html]\n")?;
        fs::write(
            project.path().join(PROJECT_FILE),
            concat!(
                "site_root: https://example.org/\n",
                "heading: Favorite Reads\n",
                "archive_link: /archive/\n",
                "photo:\n",
                "  src: static/dream.jpg\n",
                "  alt: Photo\n",
                "  link: https://www.flickr.com/photos/me\n",
                "reveal:\n",
                "  delay: 50\n",
            ),
        )?;

        let config = Config::from_project_file(
            &project.path().join(PROJECT_FILE),
            Path::new("/tmp/out"),
        )?;
        assert_eq!("Favorite Reads", config.section.heading);
        assert_eq!("https://example.org/archive/", config.section.archive_url.as_str());
        assert_eq!(vec![theme.join("books.html")], config.books_template);
        assert_eq!(Some(theme.join("static")), config.static_source_directory);
        assert_eq!(50, config.reveal.delay);
        assert_eq!(500, config.reveal.duration);

        let photo = config.section.photo.unwrap();
        assert_eq!("https://example.org/static/dream.jpg", photo.src.as_str());
        assert_eq!(
            Some("https://www.flickr.com/photos/me"),
            photo.link.as_ref().map(Url::as_str)
        );
        Ok(())
    }

    #[test]
    fn test_missing_project_file() {
        let dir = tempfile::tempdir().unwrap();
        // the temp dir's ancestors don't carry a project file either
        assert!(Config::from_directory(dir.path(), Path::new("/tmp/out")).is_err());
    }
}
