/// Counters accumulated across every store visited in one run.
///
/// Observed totals cover every readable candidate, deleted totals only the
/// removals that actually happened. Dry runs therefore report zero deleted
/// entries while still observing everything.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunStats {
    total_items: u64,
    total_bytes: u64,
    deleted_items: u64,
    deleted_bytes: u64,
}

impl RunStats {
    /// Creates an empty set of counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total_items: 0,
            total_bytes: 0,
            deleted_items: 0,
            deleted_bytes: 0,
        }
    }

    /// Records a candidate discovered during collection.
    pub const fn record_observed(&mut self, bytes: u64) {
        self.total_items = self.total_items.saturating_add(1);
        self.total_bytes = self.total_bytes.saturating_add(bytes);
    }

    /// Records a completed removal.
    pub const fn record_deleted(&mut self, bytes: u64) {
        self.deleted_items = self.deleted_items.saturating_add(1);
        self.deleted_bytes = self.deleted_bytes.saturating_add(bytes);
    }

    /// Number of candidates observed.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Total footprint of observed candidates in bytes.
    #[must_use]
    pub const fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Number of candidates removed.
    #[must_use]
    pub const fn deleted_items(&self) -> u64 {
        self.deleted_items
    }

    /// Footprint removed, in bytes.
    #[must_use]
    pub const fn deleted_bytes(&self) -> u64 {
        self.deleted_bytes
    }

    /// Candidates still present after the run.
    #[must_use]
    pub const fn remaining_items(&self) -> u64 {
        self.total_items.saturating_sub(self.deleted_items)
    }

    /// Footprint still present after the run, in bytes.
    #[must_use]
    pub const fn remaining_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.deleted_bytes)
    }

    /// Folds another store's counters into this run's totals.
    pub const fn merge(&mut self, other: Self) {
        self.total_items = self.total_items.saturating_add(other.total_items);
        self.total_bytes = self.total_bytes.saturating_add(other.total_bytes);
        self.deleted_items = self.deleted_items.saturating_add(other.deleted_items);
        self.deleted_bytes = self.deleted_bytes.saturating_add(other.deleted_bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_empty() {
        let stats = RunStats::new();
        assert_eq!(stats.total_items(), 0);
        assert_eq!(stats.remaining_bytes(), 0);
    }

    #[test]
    fn observed_and_deleted_track_separately() {
        let mut stats = RunStats::new();
        stats.record_observed(100);
        stats.record_observed(50);
        stats.record_deleted(100);

        assert_eq!(stats.total_items(), 2);
        assert_eq!(stats.total_bytes(), 150);
        assert_eq!(stats.deleted_items(), 1);
        assert_eq!(stats.deleted_bytes(), 100);
        assert_eq!(stats.remaining_items(), 1);
        assert_eq!(stats.remaining_bytes(), 50);
    }

    #[test]
    fn merge_folds_per_store_counters() {
        let mut first = RunStats::new();
        first.record_observed(10);
        first.record_deleted(10);

        let mut second = RunStats::new();
        second.record_observed(30);

        first.merge(second);
        assert_eq!(first.total_items(), 2);
        assert_eq!(first.total_bytes(), 40);
        assert_eq!(first.deleted_items(), 1);
        assert_eq!(first.remaining_bytes(), 30);
    }
}
