use std::collections::HashSet;
use std::env;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::os::unix::ffi::OsStringExt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::layout::{StoreError, TrashStore};

/// Mount table consulted by [`mounted_stores`].
const MOUNTS_PATH: &str = "/proc/mounts";

/// Store directory name underneath the user's data home.
const DATA_HOME_TRASH: &str = "Trash";

/// Resolves the default per-user trash store from the environment.
///
/// Follows the XDG base-directory rule: `$XDG_DATA_HOME/Trash` when the
/// variable is set and non-empty, otherwise `$HOME/.local/share/Trash`.
/// Returns [`None`] when neither variable is usable.
#[must_use]
pub fn home_store() -> Option<TrashStore> {
    home_store_from(
        env::var_os("XDG_DATA_HOME").as_deref(),
        env::var_os("HOME").as_deref(),
    )
}

/// Environment-independent core of [`home_store`].
#[must_use]
pub fn home_store_from(data_home: Option<&OsStr>, home: Option<&OsStr>) -> Option<TrashStore> {
    if let Some(data_home) = data_home {
        if !data_home.is_empty() {
            return Some(TrashStore::new(Path::new(data_home).join(DATA_HOME_TRASH)));
        }
    }

    let home = home.filter(|home| !home.is_empty())?;
    Some(TrashStore::new(
        Path::new(home)
            .join(".local")
            .join("share")
            .join(DATA_HOME_TRASH),
    ))
}

/// Discovers per-volume trash stores for the current user.
///
/// Reads the system mount table and probes each mount point for the two
/// conventional schemes, `<mount>/.Trash/<uid>` and `<mount>/.Trash-<uid>`.
/// Only candidates with an existing `info` subdirectory are returned;
/// duplicates are dropped while preserving mount-table order.
///
/// # Errors
///
/// Returns [`StoreError::MountTable`] when the mount table cannot be read.
pub fn mounted_stores() -> Result<Vec<TrashStore>, StoreError> {
    let table = fs::read_to_string(MOUNTS_PATH)
        .map_err(|source| StoreError::MountTable { source })?;
    let uid = rustix::process::getuid().as_raw();

    let mut seen = HashSet::new();
    let mut stores = Vec::new();
    for mount in parse_mount_points(&table) {
        for store in uid_stores_under(&mount, uid) {
            debug!(store = %store.root().display(), "found per-volume trash store");
            if seen.insert(store.clone()) {
                stores.push(store);
            }
        }
    }

    Ok(stores)
}

/// Returns the usable uid-keyed stores directly under `mount`.
///
/// The admin-created scheme (`.Trash/<uid>`) is probed before the
/// user-created one (`.Trash-<uid>`); a candidate qualifies only when its
/// `info` subdirectory exists.
#[must_use]
pub fn uid_stores_under(mount: &Path, uid: u32) -> Vec<TrashStore> {
    let candidates = [
        mount.join(".Trash").join(uid.to_string()),
        mount.join(format!(".Trash-{uid}")),
    ];

    candidates
        .into_iter()
        .map(TrashStore::new)
        .filter(|store| store.info_dir().is_dir())
        .collect()
}

/// Extracts mount points from `/proc/mounts` contents.
///
/// The kernel escapes space, tab, newline, and backslash in the mount-point
/// field as three-digit octal sequences; those are decoded here.
fn parse_mount_points(table: &str) -> Vec<PathBuf> {
    table
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .map(unescape_mount_point)
        .collect()
}

fn unescape_mount_point(field: &str) -> PathBuf {
    let bytes = field.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut index = 0;

    while index < bytes.len() {
        if bytes[index] == b'\\' && index + 3 < bytes.len() {
            if let Some(value) = octal_byte(&bytes[index + 1..index + 4]) {
                decoded.push(value);
                index += 4;
                continue;
            }
        }
        decoded.push(bytes[index]);
        index += 1;
    }

    PathBuf::from(OsString::from_vec(decoded))
}

/// Decodes a three-digit octal escape; `\377` is the largest legal byte.
fn octal_byte(digits: &[u8]) -> Option<u8> {
    let [high, mid, low] = digits else {
        return None;
    };
    if !(b'0'..=b'3').contains(high)
        || !(b'0'..=b'7').contains(mid)
        || !(b'0'..=b'7').contains(low)
    {
        return None;
    }
    Some((high - b'0') * 64 + (mid - b'0') * 8 + (low - b'0'))
}
