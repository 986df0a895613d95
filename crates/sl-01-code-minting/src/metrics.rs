//! Counters for the minting protocol
//!
//! Tracks how often each protocol branch is taken, which is what tells an
//! operator whether the filter is earning its keep: a rising share of
//! `false_positives` means the filter is saturating and should be resized
//! or reseeded.

use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for minting operations
#[derive(Debug, Default)]
pub struct MintMetrics {
    /// Candidates drawn
    pub candidates_generated: AtomicU64,
    /// Filter said "never added"; store lookup skipped
    pub filter_negatives: AtomicU64,
    /// Filter said "maybe present"
    pub filter_positives: AtomicU64,
    /// Filter unreachable; fell back to the store
    pub filter_errors: AtomicU64,
    /// Point lookups against the authoritative store
    pub authoritative_checks: AtomicU64,
    /// Lookups that found an existing record
    pub confirmed_collisions: AtomicU64,
    /// Filter positives the store did not confirm
    pub false_positives: AtomicU64,
    /// Inserts rejected by the unique index
    pub insert_races: AtomicU64,
    /// Codes accepted
    pub codes_minted: AtomicU64,
    /// Mints that ran out of attempts
    pub exhaustions: AtomicU64,
    /// Post-insert filter adds that failed
    pub filter_add_failures: AtomicU64,
}

impl MintMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_candidate(&self) {
        Self::bump(&self.candidates_generated);
    }

    pub fn record_filter_negative(&self) {
        Self::bump(&self.filter_negatives);
    }

    pub fn record_filter_positive(&self) {
        Self::bump(&self.filter_positives);
    }

    pub fn record_filter_error(&self) {
        Self::bump(&self.filter_errors);
    }

    /// Record an authoritative lookup and whether it found a record
    pub fn record_authoritative_check(&self, found: bool, filter_positive: bool) {
        Self::bump(&self.authoritative_checks);
        if found {
            Self::bump(&self.confirmed_collisions);
        } else if filter_positive {
            Self::bump(&self.false_positives);
        }
    }

    pub fn record_insert_race(&self) {
        Self::bump(&self.insert_races);
    }

    pub fn record_minted(&self) {
        Self::bump(&self.codes_minted);
    }

    pub fn record_exhausted(&self) {
        Self::bump(&self.exhaustions);
    }

    pub fn record_filter_add_failure(&self) {
        Self::bump(&self.filter_add_failures);
    }

    pub fn snapshot(&self) -> MintMetricsSnapshot {
        let load = |c: &AtomicU64| c.load(Ordering::Relaxed);
        MintMetricsSnapshot {
            candidates_generated: load(&self.candidates_generated),
            filter_negatives: load(&self.filter_negatives),
            filter_positives: load(&self.filter_positives),
            filter_errors: load(&self.filter_errors),
            authoritative_checks: load(&self.authoritative_checks),
            confirmed_collisions: load(&self.confirmed_collisions),
            false_positives: load(&self.false_positives),
            insert_races: load(&self.insert_races),
            codes_minted: load(&self.codes_minted),
            exhaustions: load(&self.exhaustions),
            filter_add_failures: load(&self.filter_add_failures),
        }
    }
}

/// Point-in-time copy of [`MintMetrics`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MintMetricsSnapshot {
    pub candidates_generated: u64,
    pub filter_negatives: u64,
    pub filter_positives: u64,
    pub filter_errors: u64,
    pub authoritative_checks: u64,
    pub confirmed_collisions: u64,
    pub false_positives: u64,
    pub insert_races: u64,
    pub codes_minted: u64,
    pub exhaustions: u64,
    pub filter_add_failures: u64,
}

impl MintMetricsSnapshot {
    /// Attempts that looped back to candidate generation
    pub fn retries(&self) -> u64 {
        self.confirmed_collisions + self.insert_races
    }

    /// Share of filter checks that needed a store lookup
    pub fn verification_rate(&self) -> f64 {
        let checks = self.filter_negatives + self.filter_positives + self.filter_errors;
        if checks == 0 {
            return 0.0;
        }
        (self.filter_positives + self.filter_errors) as f64 / checks as f64
    }
}
