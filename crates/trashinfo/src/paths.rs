use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Subdirectory of a trash store holding sidecar records.
pub const INFO_DIR: &str = "info";

/// Subdirectory of a trash store holding discarded content.
pub const FILES_DIR: &str = "files";

/// Extension (without the dot) that marks a sidecar record.
pub const TRASHINFO_EXTENSION: &str = "trashinfo";

/// Derives the real-content path for a sidecar record.
///
/// The result is `<store>/files/<stem>` where `<store>` is the parent of the
/// sidecar's containing `info` directory and `<stem>` is the sidecar filename
/// without its final extension. The derivation is purely lexical: it never
/// consults the filesystem and is valid even when the content is gone.
#[must_use]
pub fn real_file_name(sidecar: &Path) -> PathBuf {
    let stem = sidecar
        .file_stem()
        .map_or_else(OsString::new, ToOwned::to_owned);
    let store = sidecar
        .parent()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new(""));
    store.join(FILES_DIR).join(stem)
}
