//! Pokemon resources (`GET /pokemon/{name}`).

use serde::{Deserialize, Serialize};

use super::NamedResource;

/// A Pokemon as returned by PokeAPI.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    /// National Pokedex number
    #[serde(default)]
    pub id: u64,
    /// Lowercase name
    pub name: String,
    /// Experience gained for defeating this Pokemon
    #[serde(default)]
    pub base_experience: Option<u32>,
    /// Height in decimetres
    #[serde(default)]
    pub height: u32,
    /// Weight in hectograms
    #[serde(default)]
    pub weight: u32,
    /// Whether this is the default form
    #[serde(default)]
    pub is_default: bool,
    /// Sort order
    #[serde(default)]
    pub order: i64,
    /// Base stats
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    /// Types, ordered by slot
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

impl Pokemon {
    /// Returns the base value of the named stat, if present.
    pub fn stat(&self, name: &str) -> Option<u32> {
        self.stats
            .iter()
            .find(|s| s.stat.name == name)
            .map(|s| s.base_stat)
    }

    /// Iterates over the type names in slot order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.kind.name.as_str())
    }
}

/// A base stat entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonStat {
    /// Base value
    pub base_stat: u32,
    /// Effort points yielded
    #[serde(default)]
    pub effort: u32,
    /// Which stat this is
    pub stat: NamedResource,
}

/// A type slot entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonType {
    /// Slot number (1 = primary)
    #[serde(default)]
    pub slot: u8,
    /// The type
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIKACHU_JSON: &str = r#"{
        "id": 25,
        "name": "pikachu",
        "base_experience": 112,
        "height": 4,
        "weight": 60,
        "is_default": true,
        "order": 35,
        "abilities": [],
        "stats": [
            {"base_stat": 35, "effort": 0, "stat": {"name": "hp", "url": "u"}},
            {"base_stat": 55, "effort": 0, "stat": {"name": "attack", "url": "u"}},
            {"base_stat": 90, "effort": 2, "stat": {"name": "speed", "url": "u"}}
        ],
        "types": [
            {"slot": 1, "type": {"name": "electric", "url": "u"}}
        ]
    }"#;

    #[test]
    fn test_pokemon_decode() {
        let pokemon: Pokemon = serde_json::from_str(PIKACHU_JSON).unwrap();
        assert_eq!(pokemon.id, 25);
        assert_eq!(pokemon.name, "pikachu");
        assert_eq!(pokemon.base_experience, Some(112));
        assert_eq!(pokemon.height, 4);
        assert_eq!(pokemon.weight, 60);
        assert_eq!(pokemon.stat("speed"), Some(90));
        assert_eq!(pokemon.stat("special-attack"), None);
        assert_eq!(pokemon.type_names().collect::<Vec<_>>(), vec!["electric"]);
    }

    #[test]
    fn test_null_base_experience() {
        let pokemon: Pokemon =
            serde_json::from_str(r#"{"name": "glitch", "base_experience": null}"#).unwrap();
        assert_eq!(pokemon.base_experience, None);
        assert!(pokemon.stats.is_empty());
    }

    #[test]
    fn test_type_serializes_with_wire_name() {
        let ty = PokemonType {
            slot: 1,
            kind: NamedResource { name: "fire".into(), url: String::new() },
        };
        let json = serde_json::to_value(&ty).unwrap();
        assert_eq!(json["type"]["name"], "fire");
    }
}
