//! Domain Layer - Pure business logic
//!
//! This layer contains:
//! - Alphabet codec
//! - Hash-position generator
//! - Filter sizing math
//! - Filter and minting configuration
//! - Candidate generation
//! - Short-code records
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod alphabet;
pub mod candidate;
pub mod config;
pub mod hash_functions;
pub mod parameters;
pub mod record;

pub use alphabet::{Alphabet, BASE62};
pub use candidate::{CandidateSource, RandomCandidates};
pub use config::{FilterConfig, FilterConfigBuilder, MintingConfig, MAX_BIT_OFFSET, MAX_SIZE_BITS};
pub use hash_functions::compute_hash_positions;
pub use parameters::{calculate_fpr, calculate_optimal_parameters, FilterParams};
pub use record::{url_cache_key, ShortCodeRecord, URL_CACHE_PREFIX};
