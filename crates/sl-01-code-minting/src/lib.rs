//! # SL-01 Code Minting
//!
//! Collision-free short-code minting for the URL shortener: a shared Bloom
//! filter in front of the authoritative record store, and the lock-free
//! protocol that decides whether a random candidate is safe to commit.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `Alphabet`: fixed-radix codec (base-62 by default)
//!   - `compute_hash_positions`: deterministic k-position hashing
//!   - `FilterConfig` / `FilterConfigBuilder`, `MintingConfig`
//!   - `RandomCandidates`: uniform candidate generation
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `CodeMintingApi`: Driving port (inbound API)
//!   - `BitArrayStore`, `ShortCodeRepository`, `UrlCache`: Driven ports
//!
//! - **Filter** (`filter/`): `MembershipFilter` over a shared `BitArrayStore`
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `CodeMinter`: the minting protocol, implements `CodeMintingApi`
//!   - `ShortenerService`: shorten, cache-aside resolve, filter rebuild
//!
//! - **Adapters Layer** (`adapters/`): in-memory backends
//!
//! ## Invariants
//!
//! - **No false negatives**: after `add(x)`, `probably_contains(x)` is true
//!   until the filter is cleared.
//! - **Fail open**: an unreachable bit array never reads as "absent"; the
//!   minter verifies against the store instead.
//! - **Uniqueness**: the store's unique insert is the only arbiter. A
//!   duplicate-key rejection is a retry, never an error.
//!
//! ## Usage Example
//!
//! ```ignore
//! use sl_01_code_minting::{
//!     CodeMinter, FilterConfig, InMemoryBitArrayStore, InMemoryShortCodeRepository,
//!     MembershipFilter, MintingConfig,
//! };
//! use std::sync::Arc;
//!
//! let bits = Arc::new(InMemoryBitArrayStore::new());
//! let repo = Arc::new(InMemoryShortCodeRepository::new());
//! let filter = MembershipFilter::new(FilterConfig::default(), bits);
//! let minter = CodeMinter::new(filter, repo, &MintingConfig::default());
//!
//! let minted = minter.mint_unique_code("https://example.com", "10.0.0.1").await?;
//! println!("{}", minted.short_code());
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{InMemoryBitArrayStore, InMemoryShortCodeRepository, InMemoryUrlCache};
pub use config::ShortlinkConfig;
pub use domain::{
    Alphabet, CandidateSource, FilterConfig, FilterConfigBuilder, MintingConfig,
    RandomCandidates, ShortCodeRecord,
};
pub use error::{CodecError, ConfigError, FilterError, MintError, StoreError};
pub use filter::MembershipFilter;
pub use metrics::{MintMetrics, MintMetricsSnapshot};
pub use ports::{BitArrayStore, CodeMintingApi, MintedCode, ShortCodeRepository, UrlCache};
pub use service::{CodeMinter, ShortenerService};
