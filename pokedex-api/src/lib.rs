//! PokeAPI client for the Pokedex CLI.
//!
//! Every GET goes through a [`pokedex_cache::TtlCache`] keyed by the full
//! request URL: hits skip the network, successful responses fill the cache.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;

pub use client::{ApiConfig, PokeApiClient};
