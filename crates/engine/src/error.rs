use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use disk::FreeSpaceError;
use store::StoreError;

/// Exit code for internal contract violations.
pub const INTERNAL_EXIT_CODE: i32 = 2;

/// Exit code for store selection failures.
pub const STORE_SELECT_EXIT_CODE: i32 = 3;

/// Exit code for unsupported-filesystem conditions.
pub const UNSUPPORTED_FS_EXIT_CODE: i32 = 4;

/// Error produced when a pruning run must abort.
///
/// Everything recoverable is reported through the run's
/// [`Reporter`](crate::Reporter) instead; an `EngineError` always means the
/// run stopped early.
#[derive(Debug)]
pub struct EngineError {
    kind: EngineErrorKind,
}

impl EngineError {
    fn new(kind: EngineErrorKind) -> Self {
        Self { kind }
    }

    /// Wraps a store selection or validation failure.
    #[must_use]
    pub fn store(source: StoreError) -> Self {
        Self::new(EngineErrorKind::Store(source))
    }

    /// Wraps a free-space probe failure.
    #[must_use]
    pub fn free_space(source: FreeSpaceError) -> Self {
        Self::new(EngineErrorKind::FreeSpace(source))
    }

    /// Constructs an I/O error with action context.
    #[must_use]
    pub fn io(action: &'static str, path: PathBuf, source: io::Error) -> Self {
        Self::new(EngineErrorKind::Io {
            action,
            path,
            source,
        })
    }

    /// Constructs the contract-violation error for a sidecar that vanished
    /// before purge could unlink it.
    #[must_use]
    pub fn missing_sidecar(path: PathBuf) -> Self {
        Self::new(EngineErrorKind::MissingSidecar(path))
    }

    /// Returns the process exit code this failure maps to.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self.kind {
            EngineErrorKind::Store(_) | EngineErrorKind::Io { .. } => STORE_SELECT_EXIT_CODE,
            EngineErrorKind::FreeSpace(_) => UNSUPPORTED_FS_EXIT_CODE,
            EngineErrorKind::MissingSidecar(_) => INTERNAL_EXIT_CODE,
        }
    }

    /// Provides access to the underlying error kind.
    #[must_use]
    pub const fn kind(&self) -> &EngineErrorKind {
        &self.kind
    }

    /// Consumes the error and returns its kind.
    #[must_use]
    pub fn into_kind(self) -> EngineErrorKind {
        self.kind
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            EngineErrorKind::Store(source) => write!(f, "{source}"),
            EngineErrorKind::FreeSpace(source) => write!(f, "{source}"),
            EngineErrorKind::Io {
                action,
                path,
                source,
            } => write!(f, "failed to {action} '{}': {source}", path.display()),
            EngineErrorKind::MissingSidecar(path) => write!(
                f,
                "sidecar '{}' vanished before it could be removed",
                path.display()
            ),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            EngineErrorKind::Store(source) => Some(source),
            EngineErrorKind::FreeSpace(source) => Some(source),
            EngineErrorKind::Io { source, .. } => Some(source),
            EngineErrorKind::MissingSidecar(_) => None,
        }
    }
}

/// Classification of run-aborting failures.
#[derive(Debug)]
pub enum EngineErrorKind {
    /// A configured store could not be selected or validated.
    Store(StoreError),
    /// Free space could not be determined for a store that needs it.
    FreeSpace(FreeSpaceError),
    /// Filesystem interaction failed while enumerating a store.
    Io {
        /// Action being performed.
        action: &'static str,
        /// Path involved in the failure.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// A sidecar scheduled for purge no longer exists.
    MissingSidecar(PathBuf),
}
