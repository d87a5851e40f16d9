//! Downloads
//!
//! Writes rendered artifacts into a downloads directory, the filesystem
//! stand-in for the browser's blob download.

use std::{
    fs,
    path::{Path, PathBuf},
};

use bikestore::artifacts::Artifact;
use thiserror::Error;
use tracing::info;

/// Errors from writing artifacts out.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Underlying IO failure.
    #[error("failed to write artifact")]
    Io(#[from] std::io::Error),
}

/// Artifact writer rooted at a downloads directory.
#[derive(Debug, Clone)]
pub struct Downloads {
    dir: PathBuf,
}

impl Downloads {
    /// Creates a writer rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory artifacts are written into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes an artifact, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns a [`DownloadError`] if the directory or file cannot be
    /// written.
    pub fn write(&self, artifact: &Artifact) -> Result<PathBuf, DownloadError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.dir.join(&artifact.file_name);

        fs::write(&path, &artifact.contents)?;

        info!(path = %path.display(), mime = artifact.mime, "artifact written");

        Ok(path)
    }
}
