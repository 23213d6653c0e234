//! PokeAPI resource types.
//!
//! Only the fields the CLI reads are modelled; unknown fields are ignored.
//!
//! - [`NamedResource`]: `{ name, url }` reference used all over PokeAPI
//! - [`LocationAreaPage`]: one page of the location-area listing
//! - [`LocationArea`]: a single area with its Pokemon encounters
//! - [`Pokemon`]: a Pokemon with its stats and types

mod location;
mod pokemon;

pub use location::*;
pub use pokemon::*;

use serde::{Deserialize, Serialize};

/// A `{ name, url }` reference to another PokeAPI resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    /// Resource name (e.g. "pikachu")
    pub name: String,
    /// Absolute URL of the resource
    #[serde(default)]
    pub url: String,
}
