//! Code Minting Protocol
//!
//! Per attempt:
//!
//! ```text
//! GENERATE_CANDIDATE -> FILTER_CHECK -> {ACCEPT | VERIFY_AUTHORITATIVE}
//!                    -> {ACCEPT | RETRY | EXHAUSTED}
//! ```
//!
//! - Filter says "never added": go straight to ACCEPT.
//! - Filter says "maybe", or the filter is unreachable: look the code up in
//!   the authoritative store. Found means a real collision (RETRY).
//! - ACCEPT is the store's unique insert. A duplicate-key rejection means a
//!   concurrent mint took the same code after our check (RETRY).
//!
//! The unique insert is the only linearization point. Nothing is locked
//! here, and the post-insert filter add is best-effort: if it is lost the
//! code is merely verified against the store more often in the future.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::{CandidateSource, MintingConfig, RandomCandidates, ShortCodeRecord};
use crate::error::{MintError, StoreError};
use crate::filter::{MembershipFilter, DEFAULT_STORE_TIMEOUT};
use crate::metrics::MintMetrics;
use crate::ports::{bounded, CodeMintingApi, MintedCode, ShortCodeRepository};

/// What the filter said about a candidate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FilterVerdict {
    Absent,
    MaybePresent,
    Unknown,
}

/// Mints short codes that no other record holds
pub struct CodeMinter {
    filter: MembershipFilter,
    repository: Arc<dyn ShortCodeRepository>,
    candidates: Arc<dyn CandidateSource>,
    max_attempts: u32,
    store_timeout: Duration,
    metrics: Arc<MintMetrics>,
}

impl CodeMinter {
    /// Create a minter drawing random candidates per `config`
    pub fn new(
        filter: MembershipFilter,
        repository: Arc<dyn ShortCodeRepository>,
        config: &MintingConfig,
    ) -> Self {
        let candidates = RandomCandidates::new(config.alphabet.clone(), config.code_length);
        Self::with_candidate_source(filter, repository, Arc::new(candidates), config.max_attempts)
    }

    /// Create a minter with a custom candidate source
    ///
    /// `max_attempts` is raised to 1 so every mint draws at least once.
    pub fn with_candidate_source(
        filter: MembershipFilter,
        repository: Arc<dyn ShortCodeRepository>,
        candidates: Arc<dyn CandidateSource>,
        max_attempts: u32,
    ) -> Self {
        Self {
            filter,
            repository,
            candidates,
            max_attempts: max_attempts.max(1),
            store_timeout: DEFAULT_STORE_TIMEOUT,
            metrics: Arc::new(MintMetrics::new()),
        }
    }

    /// Deadline for each authoritative-store call
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<MintMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn filter(&self) -> &MembershipFilter {
        &self.filter
    }

    pub fn metrics(&self) -> &Arc<MintMetrics> {
        &self.metrics
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    async fn filter_check(&self, candidate: &str) -> FilterVerdict {
        match self.filter.probably_contains(candidate).await {
            Ok(false) => {
                self.metrics.record_filter_negative();
                FilterVerdict::Absent
            }
            Ok(true) => {
                self.metrics.record_filter_positive();
                FilterVerdict::MaybePresent
            }
            Err(e) => {
                // Fail open: unknown is treated like a hit.
                self.metrics.record_filter_error();
                warn!(error = %e, "Membership filter unavailable, verifying against store");
                FilterVerdict::Unknown
            }
        }
    }

    /// Returns true if the store already holds `candidate`
    async fn verify_authoritative(
        &self,
        candidate: &str,
        verdict: FilterVerdict,
    ) -> Result<bool, MintError> {
        let existing = bounded(self.store_timeout, self.repository.find_by_code(candidate)).await?;
        let found = existing.is_some();
        self.metrics
            .record_authoritative_check(found, verdict == FilterVerdict::MaybePresent);
        Ok(found)
    }

    /// Run the protocol until a code is accepted or attempts run out
    pub async fn mint_unique_code(
        &self,
        destination_url: &str,
        origin_identifier: &str,
    ) -> Result<MintedCode, MintError> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.candidates.next_candidate();
            self.metrics.record_candidate();

            let verdict = self.filter_check(&candidate).await;
            if verdict != FilterVerdict::Absent
                && self.verify_authoritative(&candidate, verdict).await?
            {
                debug!(attempt = attempt, candidate = %candidate, "Collision, retrying");
                continue;
            }

            let record = ShortCodeRecord::new(&candidate, destination_url, origin_identifier);
            match bounded(self.store_timeout, self.repository.insert_unique(record.clone())).await
            {
                Ok(()) => {}
                Err(StoreError::DuplicateKey(_)) => {
                    self.metrics.record_insert_race();
                    debug!(attempt = attempt, candidate = %candidate, "Lost insert race, retrying");
                    continue;
                }
                Err(e) => return Err(e.into()),
            }

            if let Err(e) = self.filter.add(&candidate).await {
                self.metrics.record_filter_add_failure();
                warn!(error = %e, candidate = %candidate, "Minted code not added to filter");
            }

            self.metrics.record_minted();
            debug!(attempt = attempt, short_code = %candidate, "Short code minted");
            return Ok(MintedCode {
                record,
                attempts: attempt,
            });
        }

        self.metrics.record_exhausted();
        warn!(attempts = self.max_attempts, "Short code generation exhausted");
        Err(MintError::GenerationExhausted {
            attempts: self.max_attempts,
        })
    }
}

#[async_trait]
impl CodeMintingApi for CodeMinter {
    async fn mint_unique_code(
        &self,
        destination_url: &str,
        origin_identifier: &str,
    ) -> Result<MintedCode, MintError> {
        CodeMinter::mint_unique_code(self, destination_url, origin_identifier).await
    }
}
