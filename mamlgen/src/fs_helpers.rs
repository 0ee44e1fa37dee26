//! Filesystem helpers shared across `mamlgen` modules.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::error::MamlgenError;

/// Opens a directory if it exists, returning `None` when the path is missing.
pub fn open_optional_dir(path: &Utf8Path) -> Result<Option<Dir>, MamlgenError> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(Some(dir)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(MamlgenError::Io {
            path: path.to_path_buf(),
            source: err,
        }),
    }
}

/// Reads a UTF-8 text file, returning `None` when it does not exist.
pub fn read_optional_text(path: &Utf8Path) -> Result<Option<String>, MamlgenError> {
    let (parent, file_name) = split_path(path)?;
    let Some(dir) = open_optional_dir(&parent)? else {
        return Ok(None);
    };
    match dir.read_to_string(file_name) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(MamlgenError::Io {
            path: path.to_path_buf(),
            source: err,
        }),
    }
}

/// Reads a UTF-8 text file that must exist.
pub fn read_text(path: &Utf8Path) -> Result<String, MamlgenError> {
    read_optional_text(path)?.ok_or_else(|| MamlgenError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::from(std::io::ErrorKind::NotFound),
    })
}

/// Splits a file path into its parent directory (`.` when bare) and name.
pub fn split_path(path: &Utf8Path) -> Result<(Utf8PathBuf, &str), MamlgenError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| MamlgenError::Message(format!("'{path}' does not name a file")))?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .map_or_else(|| Utf8PathBuf::from("."), Utf8Path::to_path_buf);
    Ok((parent, file_name))
}
