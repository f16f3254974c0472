use std::io;
use std::path::{Path, PathBuf};

use rustix::fs::statvfs;
use thiserror::Error;

/// Unit used for free-space comparisons throughout the workspace.
pub const BYTES_PER_MEGABYTE: u64 = 1024 * 1024;

/// Failure raised by [`free_megabytes`].
///
/// Both variants are fatal for a pruning run: without a trustworthy
/// free-space reading, space-driven policies cannot be applied safely.
#[derive(Debug, Error)]
pub enum FreeSpaceError {
    /// The `statvfs` call itself failed.
    #[error("cannot query free space for '{}': {source}", .path.display())]
    Probe {
        /// Path whose filesystem was being queried.
        path: PathBuf,
        /// Underlying system error.
        #[source]
        source: io::Error,
    },
    /// The filesystem reported a zero fragment size, so block counts cannot
    /// be converted to bytes.
    #[error("filesystem for '{}' reports a zero block size", .0.display())]
    UnsupportedFilesystem(PathBuf),
}

/// Returns the free space, in whole megabytes, on the filesystem containing
/// `path`.
///
/// The value is `floor(f_bavail * f_frsize / 1 MiB)`, using the unprivileged
/// available-block count so reserved root blocks are not promised to the
/// pruning policy.
///
/// # Errors
///
/// Returns [`FreeSpaceError::Probe`] when `statvfs` fails and
/// [`FreeSpaceError::UnsupportedFilesystem`] when the reported fragment size
/// is zero.
pub fn free_megabytes(path: &Path) -> Result<u64, FreeSpaceError> {
    let stat = statvfs(path).map_err(|errno| FreeSpaceError::Probe {
        path: path.to_path_buf(),
        source: errno.into(),
    })?;

    if stat.f_frsize == 0 {
        return Err(FreeSpaceError::UnsupportedFilesystem(path.to_path_buf()));
    }

    Ok(stat.f_bavail.saturating_mul(stat.f_frsize) / BYTES_PER_MEGABYTE)
}
