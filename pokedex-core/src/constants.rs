//! Constants for the Pokedex CLI.
//!
//! Endpoint paths mirror the public PokeAPI v2 layout.

// ═══════════════════════════════════════════════════════════════════════════════
// POKEAPI ENDPOINTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Base URL of the public PokeAPI v2 service.
pub const POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Path segment for location-area resources.
pub const LOCATION_AREA_PATH: &str = "location-area";

/// Path segment for Pokemon resources.
pub const POKEMON_PATH: &str = "pokemon";

// ═══════════════════════════════════════════════════════════════════════════════
// HTTP
// ═══════════════════════════════════════════════════════════════════════════════

/// Default request timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("pokedex-cli/", env!("CARGO_PKG_VERSION"));

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE
// ═══════════════════════════════════════════════════════════════════════════════

/// Default response-cache interval in milliseconds.
///
/// Used both as the entry TTL and as the reap period, so an entry can
/// survive for up to twice this long.
pub const DEFAULT_CACHE_INTERVAL_MS: u64 = 5_000;

// ═══════════════════════════════════════════════════════════════════════════════
// CATCHING
// ═══════════════════════════════════════════════════════════════════════════════

/// Exclusive upper bound of a catch roll.
pub const CATCH_ROLL_MAX: u32 = 100;

/// A roll at or above this value catches the Pokemon (a flat 50% chance).
pub const DEFAULT_CATCH_THRESHOLD: u32 = 50;
