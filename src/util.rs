//! File system helpers shared by configuration loading and the site build.

use anyhow::{anyhow, Result};
use std::fs::File;
use std::io;
use std::path::Path;

/// Opens `path`, naming the `kind` of file in the error message.
pub fn open(path: &Path, kind: &str) -> Result<File> {
    File::open(path)
        .map_err(|e| anyhow!("Opening {} file `{}`: {}", kind, path.display(), e))
}

/// Removes `dir` and everything in it. A missing directory is not an error.
pub fn rmdir(dir: &Path) -> io::Result<()> {
    match std::fs::remove_dir_all(dir) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        result => result,
    }
}

/// Recursively copies the contents of `src` into `dst`, creating `dst` and
/// any intermediate directories.
pub fn copy_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), target)?;
        }
    }
    Ok(())
}
