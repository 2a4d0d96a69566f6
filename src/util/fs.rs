//! Filesystem utilities.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::core::errors::HeaderError;

/// Read an input header, reporting a missing file as such.
pub fn read_header(path: &Path) -> Result<String, HeaderError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => HeaderError::MissingInputFile {
            path: path.to_path_buf(),
        },
        _ => HeaderError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Read a file to string.
pub fn read_to_string(path: &Path) -> Result<String, HeaderError> {
    fs::read_to_string(path).map_err(|source| HeaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace `path` with `contents` in one step.
///
/// The text goes to a temporary file next to the destination which is then
/// renamed over it, so readers never see a half-written header. Parent
/// directories are created as needed.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), HeaderError> {
    let io_err = |source: io::Error| HeaderError::Io {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(io_err)?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(io_err)?;
    tmp.write_all(contents.as_bytes()).map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    Ok(())
}
