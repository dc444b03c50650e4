//! Artwork image files referenced by scheduled tracks.
//!
//! ## Summary
//! Artwork is stored flat in one directory and referenced by URL; the file name
//! is the URL's last path segment (`/schedule/cover.jpg` → `<dir>/cover.jpg`).
//! Removal is idempotent: a file that is already gone is not an error.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone)]
pub struct ArtworkStore {
    root: PathBuf,
}

impl ArtworkStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// ## Summary
    /// Extracts the stored file name from an artwork URL.
    ///
    /// Query strings and fragments are ignored. Returns `None` when the last
    /// segment is empty or could escape the artwork directory.
    #[must_use]
    pub fn file_name(url: &str) -> Option<&str> {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        let name = path.rsplit('/').next().unwrap_or_default();

        if name.is_empty() || name == "." || name == ".." || name.contains('\\') {
            return None;
        }
        Some(name)
    }

    /// Location on disk of the artwork behind `url`.
    #[must_use]
    pub fn path_for(&self, url: &str) -> Option<PathBuf> {
        Self::file_name(url).map(|name| self.root.join(name))
    }

    /// ## Summary
    /// Deletes the artwork behind `url`.
    ///
    /// Returns `true` if a file was removed, `false` if there was nothing to
    /// remove or the URL does not map to a file name.
    ///
    /// ## Errors
    /// Returns `StorageError` if the file exists but cannot be deleted.
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn remove(&self, url: &str) -> ServiceResult<bool> {
        let Some(path) = self.path_for(url) else {
            tracing::debug!("Artwork URL has no usable file name");
            return Ok(false);
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Removed artwork file");
                Ok(true)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::trace!(path = %path.display(), "Artwork file already absent");
                Ok(false)
            }
            Err(source) => Err(ServiceError::StorageError { path, source }),
        }
    }
}
