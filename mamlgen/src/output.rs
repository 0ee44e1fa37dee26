//! Output sinks for rendered help.

use std::fmt;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};

use crate::error::MamlgenError;
use crate::fs_helpers::split_path;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const STDOUT_MARKER: &str = "-";

/// Where rendered help is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Standard output.
    Stdout,
    /// A file, created or truncated.
    File(Utf8PathBuf),
}

impl OutputTarget {
    /// Resolves the configured output for `module`.
    ///
    /// `-` selects stdout; no value selects `<module>-Help.xml`.
    #[must_use]
    pub fn resolve(output: Option<&str>, module: &Utf8Path) -> Self {
        match output {
            Some(STDOUT_MARKER) => Self::Stdout,
            Some(path) => Self::File(Utf8PathBuf::from(path)),
            None => Self::File(Utf8PathBuf::from(format!("{module}-Help.xml"))),
        }
    }

    /// Writes `content` to the target.
    ///
    /// A byte-order mark is only ever written to files.
    ///
    /// # Errors
    ///
    /// Returns [`MamlgenError::Io`] when the file or stdout cannot be
    /// written.
    pub fn write(
        &self,
        content: &str,
        include_bom: bool,
        stdout: &mut dyn Write,
    ) -> Result<(), MamlgenError> {
        match self {
            Self::Stdout => stdout
                .write_all(content.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|io_err| MamlgenError::Io {
                    path: Utf8PathBuf::from(STDOUT_MARKER),
                    source: io_err,
                }),
            Self::File(path) => write_text_file(path, content, include_bom),
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("<stdout>"),
            Self::File(path) => write!(f, "{path}"),
        }
    }
}

/// Ensures a directory exists and returns a handle to it.
fn ensure_dir(path: &Utf8Path) -> Result<Dir, MamlgenError> {
    let io_error = |io_err| MamlgenError::Io {
        path: path.to_path_buf(),
        source: io_err,
    };
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority()).map_err(io_error)?;
            Dir::open_ambient_dir(path, ambient_authority()).map_err(io_error)
        }
        Err(open_err) => Err(io_error(open_err)),
    }
}

fn write_text_file(path: &Utf8Path, content: &str, include_bom: bool) -> Result<(), MamlgenError> {
    let (parent, file_name) = split_path(path)?;
    let dir = ensure_dir(&parent)?;
    let io_error = |io_err| MamlgenError::Io {
        path: path.to_path_buf(),
        source: io_err,
    };
    let mut file = dir
        .open_with(
            file_name,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(io_error)?;
    if include_bom {
        file.write_all(&UTF8_BOM).map_err(io_error)?;
    }
    file.write_all(content.as_bytes()).map_err(io_error)?;
    tracing::info!(%path, bytes = content.len(), "wrote MAML help");
    Ok(())
}
