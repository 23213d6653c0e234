//! Time-expiring cache for raw PokeAPI responses.
//!
//! Entries share one TTL and are reclaimed by a periodic background sweep
//! rather than checked on read.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;

pub use cache::{CacheConfig, CacheStats, TtlCache};
