//! Error types for the Pokedex.
//!
//! The cache itself never fails; everything here belongs to the request
//! path (transport, status, decoding) and to user input.

use thiserror::Error;

/// Result type alias using `PokedexError`.
pub type Result<T> = std::result::Result<T, PokedexError>;

/// Main error type for all Pokedex operations.
#[derive(Debug, Error)]
pub enum PokedexError {
    // ═══════════════════════════════════════════════════════════════════════════
    // NETWORK ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// Requested URL
        url: String,
        /// Response status code
        status: u16,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION & CONFIG ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Input validation failed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PokedexError {
    /// Returns true if this error is recoverable (can retry).
    pub fn is_recoverable(&self) -> bool {
        match self {
            PokedexError::Http(_) => true,
            PokedexError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Returns true if the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PokedexError::HttpStatus { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_error_display() {
        let err = PokedexError::HttpStatus {
            url: "https://pokeapi.co/api/v2/pokemon/missingno".into(),
            status: 404,
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("missingno"));
    }

    #[test_case(500, true ; "server error")]
    #[test_case(503, true ; "unavailable")]
    #[test_case(429, true ; "rate limited")]
    #[test_case(404, false ; "not found")]
    #[test_case(400, false ; "bad request")]
    fn test_status_recoverable(status: u16, expected: bool) {
        let err = PokedexError::HttpStatus { url: "u".into(), status };
        assert_eq!(err.is_recoverable(), expected);
    }

    #[test]
    fn test_error_classification() {
        assert!(PokedexError::Http("reset".into()).is_recoverable());
        assert!(!PokedexError::Validation("empty".into()).is_recoverable());
        assert!(PokedexError::HttpStatus { url: "u".into(), status: 404 }.is_not_found());
        assert!(!PokedexError::Http("reset".into()).is_not_found());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_result: std::result::Result<serde_json::Value, _> = serde_json::from_str("invalid");
        let result: Result<serde_json::Value> = json_result.map_err(PokedexError::from);
        assert!(matches!(result, Err(PokedexError::Json(_))));
    }
}
