use thiserror::Error;

use crate::rank::PriorityPattern;

/// Failure building a [`Policy`].
#[derive(Debug, Error)]
pub enum PolicyError {
    /// `--min-free` and `--delete` cannot both drive the byte budget.
    #[error("--min-free and --delete are mutually exclusive")]
    MinFreeConflictsWithTarget,
    /// A priority pattern failed to compile.
    #[error("invalid priority pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Pattern text as supplied by the user.
        pattern: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },
}

/// Immutable per-run pruning policy.
///
/// All byte-denominated fields are plain bytes; the command-line layer
/// converts its megabyte inputs before building the policy. A zero threshold
/// or target disables the corresponding trigger, so the default policy
/// purges nothing.
#[derive(Clone, Debug, Default)]
pub struct Policy {
    age_threshold_days: u32,
    delete_target_bytes: u64,
    min_free_bytes: u64,
    max_free_bytes: u64,
    patterns: Vec<PriorityPattern>,
    dry_run: bool,
    check: bool,
    stat: bool,
}

impl Policy {
    /// Starts building a policy.
    #[must_use]
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::default()
    }

    /// Age threshold in days; zero disables the age trigger.
    #[must_use]
    pub const fn age_threshold_days(&self) -> u32 {
        self.age_threshold_days
    }

    /// Explicit per-store delete target in bytes; zero disables it.
    #[must_use]
    pub const fn delete_target_bytes(&self) -> u64 {
        self.delete_target_bytes
    }

    /// Free-space goal in bytes; zero disables the min-free derivation.
    #[must_use]
    pub const fn min_free_bytes(&self) -> u64 {
        self.min_free_bytes
    }

    /// Skip-guard in bytes; stores with more free space are left untouched.
    #[must_use]
    pub const fn max_free_bytes(&self) -> u64 {
        self.max_free_bytes
    }

    /// Priority patterns in the order the user supplied them.
    #[must_use]
    pub fn patterns(&self) -> &[PriorityPattern] {
        &self.patterns
    }

    /// Whether purges are reported instead of executed.
    #[must_use]
    pub const fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Whether broken trash entries are reported during collection.
    #[must_use]
    pub const fn check(&self) -> bool {
        self.check
    }

    /// Whether end-of-run statistics were requested.
    #[must_use]
    pub const fn stat(&self) -> bool {
        self.stat
    }

    /// Whether any space-driven policy needs a free-space reading.
    #[must_use]
    pub const fn needs_free_space(&self) -> bool {
        self.min_free_bytes > 0 || self.max_free_bytes > 0
    }
}

/// Builder for [`Policy`].
#[derive(Clone, Debug, Default)]
pub struct PolicyBuilder {
    age_threshold_days: u32,
    delete_target_bytes: u64,
    min_free_bytes: u64,
    max_free_bytes: u64,
    patterns: Vec<PriorityPattern>,
    dry_run: bool,
    check: bool,
    stat: bool,
}

impl PolicyBuilder {
    /// Sets the age threshold in days.
    #[must_use]
    pub const fn with_age_threshold_days(mut self, days: u32) -> Self {
        self.age_threshold_days = days;
        self
    }

    /// Sets the explicit delete target in bytes.
    #[must_use]
    pub const fn with_delete_target_bytes(mut self, bytes: u64) -> Self {
        self.delete_target_bytes = bytes;
        self
    }

    /// Sets the free-space goal in bytes.
    #[must_use]
    pub const fn with_min_free_bytes(mut self, bytes: u64) -> Self {
        self.min_free_bytes = bytes;
        self
    }

    /// Sets the skip-guard in bytes.
    #[must_use]
    pub const fn with_max_free_bytes(mut self, bytes: u64) -> Self {
        self.max_free_bytes = bytes;
        self
    }

    /// Appends a priority pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: PriorityPattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    /// Replaces the pattern list.
    #[must_use]
    pub fn with_patterns(mut self, patterns: Vec<PriorityPattern>) -> Self {
        self.patterns = patterns;
        self
    }

    /// Enables or disables dry-run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Enables or disables broken-entry checking.
    #[must_use]
    pub const fn with_check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    /// Enables or disables statistics collection.
    #[must_use]
    pub const fn with_stat(mut self, stat: bool) -> Self {
        self.stat = stat;
        self
    }

    /// Validates the configuration and produces the immutable [`Policy`].
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::MinFreeConflictsWithTarget`] when both
    /// `min_free_bytes` and `delete_target_bytes` are nonzero.
    pub fn build(self) -> Result<Policy, PolicyError> {
        if self.min_free_bytes > 0 && self.delete_target_bytes > 0 {
            return Err(PolicyError::MinFreeConflictsWithTarget);
        }

        Ok(Policy {
            age_threshold_days: self.age_threshold_days,
            delete_target_bytes: self.delete_target_bytes,
            min_free_bytes: self.min_free_bytes,
            max_free_bytes: self.max_free_bytes,
            patterns: self.patterns,
            dry_run: self.dry_run,
            check: self.check,
            stat: self.stat,
        })
    }
}
