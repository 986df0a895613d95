//! Adapters Layer - Implementations of the driven ports
//!
//! - `InMemoryBitArrayStore`: shared bit arrays with Redis bit order
//! - `InMemoryShortCodeRepository`: unique-indexed record store
//! - `InMemoryUrlCache`: TTL cache for short-code -> URL lookups

pub mod bit_array;
pub mod cache;
pub mod repository;

pub use bit_array::InMemoryBitArrayStore;
pub use cache::InMemoryUrlCache;
pub use repository::InMemoryShortCodeRepository;
