use std::borrow::Cow;
use std::path::{Path, PathBuf};

use time::PrimitiveDateTime;

const SECONDS_PER_DAY: i64 = 86_400;

/// One trashed item: a sidecar record plus its real-content counterpart.
///
/// The sidecar path is the unique key within a run. The real path is derived
/// lexically and may not exist; a missing or dangling target is tolerated
/// throughout the engine.
#[derive(Clone, Debug)]
pub struct Candidate {
    sidecar_path: PathBuf,
    real_path: PathBuf,
    deletion_time: PrimitiveDateTime,
    age_seconds: i64,
    consumed_bytes: Option<u64>,
}

impl Candidate {
    /// Builds a candidate, deriving its age from `now`.
    ///
    /// Ages use floor semantics: a deletion time in the future yields a
    /// negative age, which no threshold matches.
    #[must_use]
    pub fn new(
        sidecar_path: PathBuf,
        real_path: PathBuf,
        deletion_time: PrimitiveDateTime,
        now: PrimitiveDateTime,
    ) -> Self {
        let age_seconds = (now - deletion_time).whole_seconds();
        Self {
            sidecar_path,
            real_path,
            deletion_time,
            age_seconds,
            consumed_bytes: None,
        }
    }

    /// Attaches the computed disk footprint.
    #[must_use]
    pub const fn with_consumed_bytes(mut self, bytes: u64) -> Self {
        self.consumed_bytes = Some(bytes);
        self
    }

    /// Location of the sidecar record.
    #[must_use]
    pub fn sidecar_path(&self) -> &Path {
        &self.sidecar_path
    }

    /// Derived location of the real content.
    #[must_use]
    pub fn real_path(&self) -> &Path {
        &self.real_path
    }

    /// Timestamp parsed from the sidecar.
    #[must_use]
    pub const fn deletion_time(&self) -> PrimitiveDateTime {
        self.deletion_time
    }

    /// Whole seconds elapsed between deletion and collection time.
    #[must_use]
    pub const fn age_seconds(&self) -> i64 {
        self.age_seconds
    }

    /// Whole days elapsed, flooring (two days minus a second is one day).
    #[must_use]
    pub const fn age_days(&self) -> i64 {
        self.age_seconds.div_euclid(SECONDS_PER_DAY)
    }

    /// Disk footprint, when the policy asked for it to be computed.
    #[must_use]
    pub const fn consumed_bytes(&self) -> Option<u64> {
        self.consumed_bytes
    }

    /// Basename of the real content, for priority-pattern matching.
    #[must_use]
    pub fn real_basename(&self) -> Option<Cow<'_, str>> {
        self.real_path.file_name().map(|name| name.to_string_lossy())
    }
}
