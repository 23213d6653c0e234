//! Location-area resources.
//!
//! The listing endpoint is paginated; `next` and `previous` carry absolute
//! URLs and are `null` at either end of the list.

use serde::{Deserialize, Serialize};

use super::NamedResource;

/// One page of `GET /location-area/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationAreaPage {
    /// Total number of location areas
    #[serde(default)]
    pub count: u64,
    /// URL of the next page, if any
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page, if any
    #[serde(default)]
    pub previous: Option<String>,
    /// Areas on this page
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

impl LocationAreaPage {
    /// Iterates over the area names on this page.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|r| r.name.as_str())
    }

    /// Returns true if this is the first page.
    pub fn is_first(&self) -> bool {
        self.previous.is_none()
    }

    /// Returns true if this is the last page.
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}

/// A single location area (`GET /location-area/{name}`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationArea {
    /// Area ID
    #[serde(default)]
    pub id: u64,
    /// Area name
    pub name: String,
    /// Pokemon that can be encountered here
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

impl LocationArea {
    /// Iterates over the names of Pokemon found in this area.
    pub fn pokemon_names(&self) -> impl Iterator<Item = &str> {
        self.pokemon_encounters.iter().map(|e| e.pokemon.name.as_str())
    }
}

/// A Pokemon encounter entry within a location area.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonEncounter {
    /// The Pokemon that can be encountered
    pub pokemon: NamedResource,
}
