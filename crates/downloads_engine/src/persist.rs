use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot use download directory {path:?}: {reason}")]
    DownloadDir { path: PathBuf, reason: String },
    #[error("failed to write download: {0}")]
    Io(#[from] io::Error),
}

/// Creates `dir` (and parents) unless it already is a directory.
pub fn ensure_download_dir(dir: &Path) -> Result<(), PersistError> {
    let dir_error = |reason: String| PersistError::DownloadDir {
        path: dir.to_path_buf(),
        reason,
    };
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(dir_error("not a directory".to_string())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|err| dir_error(err.to_string()))
        }
        Err(err) => Err(dir_error(err.to_string())),
    }
}

/// Saves downloads into one directory. Content is staged in a temp file next
/// to the target and renamed over it, so readers never see a partial file.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Writes `content` to `{dir}/{filename}`, replacing an earlier copy.
    pub fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_download_dir(&self.dir)?;

        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(content)?;
        staged.as_file().sync_all()?;

        let target = self.dir.join(filename);
        staged.persist(&target).map_err(|err| err.error)?;
        Ok(target)
    }
}
