use std::fs;
use std::io::{self, Write};
use std::path::Path;

use logging::Verbosity;

use crate::candidate::Candidate;
use crate::error::EngineError;
use crate::report::Reporter;

/// Chosen response to a failed removal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RecoveryAction {
    /// Grant write access on the failing entry and retry once.
    RetryWithWriteAccess,
    /// Report the failure and move on.
    LogAndContinue,
}

/// Strategy consulted whenever removing a filesystem entry fails.
///
/// Injected into [`purge`] so failure handling can be exercised in tests
/// without manufacturing real filesystem faults.
pub trait RemovalRecovery {
    /// Picks the response for a failure of `kind` at `path`.
    fn resolve(&self, path: &Path, kind: io::ErrorKind) -> RecoveryAction;
}

/// Default strategy: retry a permission failure once after making the entry
/// writable, give up on anything else.
#[derive(Clone, Copy, Debug, Default)]
pub struct WritePermissionRecovery;

impl RemovalRecovery for WritePermissionRecovery {
    fn resolve(&self, _path: &Path, kind: io::ErrorKind) -> RecoveryAction {
        if kind == io::ErrorKind::PermissionDenied {
            RecoveryAction::RetryWithWriteAccess
        } else {
            RecoveryAction::LogAndContinue
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Contents {
    Symlink,
    Directory,
    File,
    Missing,
}

fn classify(path: &Path) -> Contents {
    match fs::symlink_metadata(path) {
        Ok(metadata) => {
            let file_type = metadata.file_type();
            if file_type.is_symlink() {
                Contents::Symlink
            } else if file_type.is_dir() {
                Contents::Directory
            } else {
                Contents::File
            }
        }
        Err(_) => Contents::Missing,
    }
}

/// Removes a candidate's real content and its sidecar record.
///
/// A dry run only reports what a live run would do and always returns
/// `false`. A live run removes a symlink or regular file outright, removes a
/// directory tree best-effort with per-entry recovery, tolerates content that
/// is already gone, and finally unlinks the sidecar. Returns `true` when the
/// sidecar was removed.
///
/// # Errors
///
/// The sidecar must still exist when a live purge reaches it; finding it gone
/// is a contract violation and aborts the run. Other sidecar removal
/// failures are reported and leave the record for a later run.
pub fn purge<Out: Write, Err: Write>(
    candidate: &Candidate,
    dry_run: bool,
    recovery: &dyn RemovalRecovery,
    reporter: &mut Reporter<'_, Out, Err>,
) -> Result<bool, EngineError> {
    let real = candidate.real_path();
    let sidecar = candidate.sidecar_path();
    let contents = classify(real);

    if dry_run {
        let line = if matches!(contents, Contents::Missing) {
            format!(
                "would ignore '{}' (missing), would remove '{}'",
                real.display(),
                sidecar.display(),
            )
        } else {
            format!(
                "would remove '{}' and '{}'",
                real.display(),
                sidecar.display(),
            )
        };
        reporter.line(Verbosity::Normal, &line);
        return Ok(false);
    }

    let content_cleared = match contents {
        Contents::Symlink | Contents::File => {
            attempt_removal(real, RemovalKind::File, recovery, reporter)
        }
        Contents::Directory => {
            remove_tree(real, recovery, reporter);
            true
        }
        Contents::Missing => {
            reporter.info(
                Verbosity::Verbose,
                format!("'{}' is already gone, removing its record", real.display()),
            );
            true
        }
    };
    if !content_cleared {
        return Ok(false);
    }

    match fs::remove_file(sidecar) {
        Ok(()) => Ok(true),
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            Err(EngineError::missing_sidecar(sidecar.to_path_buf()))
        }
        Err(error) => {
            reporter.warning(format!(
                "cannot remove record '{}': {error}",
                sidecar.display(),
            ));
            Ok(false)
        }
    }
}

/// Removes `root` and everything beneath it, best-effort.
///
/// Tree damage is contained: an entry that resists removal is reported and
/// skipped, and the walk carries on with its siblings.
fn remove_tree<Out: Write, Err: Write>(
    root: &Path,
    recovery: &dyn RemovalRecovery,
    reporter: &mut Reporter<'_, Out, Err>,
) {
    clear_directory(root, recovery, reporter);
    attempt_removal(root, RemovalKind::Directory, recovery, reporter);
}

fn clear_directory<Out: Write, Err: Write>(
    dir: &Path,
    recovery: &dyn RemovalRecovery,
    reporter: &mut Reporter<'_, Out, Err>,
) {
    let Some(read_dir) = open_directory(dir, recovery, reporter) else {
        return;
    };

    for entry in read_dir {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                reporter.warning(format!(
                    "cannot read an entry of '{}': {error}",
                    dir.display(),
                ));
                continue;
            }
        };
        let path = entry.path();
        if entry.file_type().is_ok_and(|file_type| file_type.is_dir()) {
            remove_tree(&path, recovery, reporter);
        } else {
            attempt_removal(&path, RemovalKind::File, recovery, reporter);
        }
    }
}

fn open_directory<Out: Write, Err: Write>(
    dir: &Path,
    recovery: &dyn RemovalRecovery,
    reporter: &mut Reporter<'_, Out, Err>,
) -> Option<fs::ReadDir> {
    let error = match fs::read_dir(dir) {
        Ok(read_dir) => return Some(read_dir),
        Err(error) => error,
    };

    if recovery.resolve(dir, error.kind()) == RecoveryAction::RetryWithWriteAccess {
        grant_write_access(dir, reporter);
        if let Ok(read_dir) = fs::read_dir(dir) {
            return Some(read_dir);
        }
    }

    reporter.warning(format!("cannot open '{}': {error}", dir.display()));
    None
}

#[derive(Clone, Copy, Debug)]
enum RemovalKind {
    File,
    Directory,
}

fn remove_once(path: &Path, kind: RemovalKind) -> io::Result<()> {
    match kind {
        RemovalKind::File => fs::remove_file(path),
        RemovalKind::Directory => fs::remove_dir(path),
    }
}

fn attempt_removal<Out: Write, Err: Write>(
    path: &Path,
    kind: RemovalKind,
    recovery: &dyn RemovalRecovery,
    reporter: &mut Reporter<'_, Out, Err>,
) -> bool {
    let error = match remove_once(path, kind) {
        Ok(()) => return true,
        Err(error) => error,
    };

    if recovery.resolve(path, error.kind()) == RecoveryAction::RetryWithWriteAccess {
        grant_write_access(path, reporter);
        match remove_once(path, kind) {
            Ok(()) => return true,
            Err(retry_error) => {
                reporter.warning(format!(
                    "cannot remove '{}': {retry_error}",
                    path.display(),
                ));
                return false;
            }
        }
    }

    reporter.warning(format!("cannot remove '{}': {error}", path.display()));
    false
}

#[cfg(unix)]
fn grant_write_access<Out: Write, Err: Write>(
    path: &Path,
    reporter: &mut Reporter<'_, Out, Err>,
) {
    use std::os::unix::fs::PermissionsExt;

    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(error) => {
            reporter.warning(format!(
                "cannot inspect '{}': {error}",
                path.display(),
            ));
            return;
        }
    };

    // Directories also need read and search access to be cleared.
    let mode = metadata.permissions().mode();
    let granted = if metadata.is_dir() {
        mode | 0o700
    } else {
        mode | 0o200
    };
    if let Err(error) = fs::set_permissions(path, fs::Permissions::from_mode(granted)) {
        reporter.warning(format!(
            "cannot make '{}' writable: {error}",
            path.display(),
        ));
    }
}

#[cfg(not(unix))]
fn grant_write_access<Out: Write, Err: Write>(
    path: &Path,
    reporter: &mut Reporter<'_, Out, Err>,
) {
    let _ = path;
    let _ = reporter;
}
