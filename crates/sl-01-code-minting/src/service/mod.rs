//! Service Layer
//!
//! - `CodeMinter`: the minting protocol, implements `CodeMintingApi`
//! - `ShortenerService`: shorten / resolve / filter rebuild

pub mod code_minter;
pub mod shortener_service;

pub use code_minter::CodeMinter;
pub use shortener_service::{ShortenerService, DEFAULT_URL_CACHE_TTL};
