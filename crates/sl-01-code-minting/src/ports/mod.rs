//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - API for request handlers
//! - Driven Ports (outbound) - bit-array store, record store, cache

pub mod inbound;
pub mod outbound;

pub use inbound::{CodeMintingApi, MintedCode};
pub use outbound::{bounded, BitArrayStore, ShortCodeRepository, UrlCache};
