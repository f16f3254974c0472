use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use trashinfo::{FILES_DIR, INFO_DIR};

/// Failure raised while selecting or validating trash stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A configured store has no `info` subdirectory, so there is nothing to
    /// enumerate and the run cannot proceed against it.
    #[error("cannot find trash information directory '{}'", .0.display())]
    MissingInfoDir(PathBuf),
    /// The system mount table could not be read.
    #[error("cannot read mount table: {source}")]
    MountTable {
        /// Underlying system error.
        #[source]
        source: io::Error,
    },
}

/// One trash store root with the XDG `info`/`files` layout.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TrashStore {
    root: PathBuf,
}

impl TrashStore {
    /// Creates a store handle for `root` without touching the filesystem.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Returns the store root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the directory holding sidecar records.
    #[must_use]
    pub fn info_dir(&self) -> PathBuf {
        self.root.join(INFO_DIR)
    }

    /// Returns the directory holding discarded content.
    #[must_use]
    pub fn files_dir(&self) -> PathBuf {
        self.root.join(FILES_DIR)
    }

    /// Verifies that the store's `info` directory exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingInfoDir`] when it does not; the caller
    /// treats that as fatal for the run.
    pub fn require_info_dir(&self) -> Result<(), StoreError> {
        let info = self.info_dir();
        if info.is_dir() {
            Ok(())
        } else {
            Err(StoreError::MissingInfoDir(info))
        }
    }
}
