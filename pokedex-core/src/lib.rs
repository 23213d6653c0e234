//! # Pokedex Core
//!
//! Core types, errors, and constants shared by the Pokedex crates.
//!
//! - **Types**: PokeAPI resources (location-area pages, location areas, Pokemon)
//! - **Errors**: A single error type with classification helpers
//! - **Constants**: API endpoints and default tunables
//!
//! ## Example
//!
//! ```rust
//! use pokedex_core::LocationAreaPage;
//!
//! let page: LocationAreaPage = serde_json::from_str(
//!     r#"{"count":1,"next":null,"previous":null,"results":[{"name":"canalave-city-area","url":""}]}"#,
//! ).unwrap();
//! assert_eq!(page.results[0].name, "canalave-city-area");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{PokedexError, Result};
pub use types::*;
