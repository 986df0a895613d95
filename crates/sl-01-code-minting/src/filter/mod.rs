//! Membership filter composed over a shared bit-array store

pub mod membership_filter;

pub use membership_filter::{MembershipFilter, DEFAULT_STORE_TIMEOUT};
