//! PokeAPI HTTP client.
//!
//! The cache is a side channel: it is consulted before a request and
//! populated after a successful one. Transport failures, non-2xx statuses
//! and decode errors are always returned to the caller and never cached.

use std::time::Duration;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use pokedex_cache::TtlCache;
use pokedex_core::constants::{
    DEFAULT_HTTP_TIMEOUT_SECS, LOCATION_AREA_PATH, POKEAPI_BASE_URL, POKEMON_PATH, USER_AGENT,
};
use pokedex_core::error::{PokedexError, Result};
use pokedex_core::types::{LocationArea, LocationAreaPage, Pokemon};

/// PokeAPI client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root, without trailing slash (e.g. "https://pokeapi.co/api/v2")
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent header
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: POKEAPI_BASE_URL.into(),
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS,
            user_agent: USER_AGENT.into(),
        }
    }
}

impl ApiConfig {
    /// Creates a configuration for the given API root.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// Cached PokeAPI client.
pub struct PokeApiClient {
    config: ApiConfig,
    http_client: reqwest::Client,
    cache: TtlCache,
}

impl PokeApiClient {
    /// Creates a client that memoizes response bodies in `cache`.
    pub fn new(config: ApiConfig, cache: TtlCache) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| PokedexError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
            cache,
        })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Returns the response cache.
    pub fn cache(&self) -> &TtlCache {
        &self.cache
    }

    /// URL of the first location-area page.
    pub fn first_page_url(&self) -> String {
        format!("{}/{}/", self.config.base_url, LOCATION_AREA_PATH)
    }

    /// Fetches the raw body at `url`, serving it from the cache when possible.
    #[instrument(skip(self))]
    pub async fn fetch_raw(&self, url: &str) -> Result<Bytes> {
        if let Some(body) = self.cache.get(url) {
            debug!(url, "Cache hit");
            return Ok(body);
        }

        debug!(url, "Cache miss, fetching");

        let response = self.http_client.get(url).send().await.map_err(|e| {
            warn!(url, error = %e, "Request failed");
            PokedexError::Http(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "Unexpected status");
            return Err(PokedexError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| PokedexError::Http(e.to_string()))?;

        self.cache.add(url, body.clone());
        debug!(url, bytes = body.len(), "Fetched and cached");
        Ok(body)
    }

    /// Fetches a location-area page; `None` means the first page.
    pub async fn location_areas(&self, page_url: Option<&str>) -> Result<LocationAreaPage> {
        let url = match page_url {
            Some(url) => url.to_string(),
            None => self.first_page_url(),
        };
        self.fetch_json(&url).await
    }

    /// Fetches a single location area by name or ID.
    pub async fn location_area(&self, name: &str) -> Result<LocationArea> {
        let name = normalize_name(name)?;
        let url = format!("{}/{}/{}", self.config.base_url, LOCATION_AREA_PATH, name);
        self.fetch_json(&url).await
    }

    /// Fetches a Pokemon by name or ID.
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        let name = normalize_name(name)?;
        let url = format!("{}/{}/{}", self.config.base_url, POKEMON_PATH, name);
        self.fetch_json(&url).await
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.fetch_raw(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Trims and lowercases a resource name, rejecting anything that is not a
/// single path segment.
fn normalize_name(name: &str) -> Result<String> {
    let normalized = name.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(PokedexError::Validation("name cannot be empty".into()));
    }
    if !normalized
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(PokedexError::Validation(format!(
            "invalid name '{}': only letters, digits and '-' are allowed",
            name.trim()
        )));
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE_ONE: &str = r#"{
        "count": 40,
        "next": "NEXT",
        "previous": null,
        "results": [
            {"name": "canalave-city-area", "url": "u"},
            {"name": "eterna-city-area", "url": "u"}
        ]
    }"#;

    const PIKACHU: &str = r#"{
        "id": 25, "name": "pikachu", "base_experience": 112, "height": 4, "weight": 60,
        "stats": [{"base_stat": 35, "effort": 0, "stat": {"name": "hp", "url": "u"}}],
        "types": [{"slot": 1, "type": {"name": "electric", "url": "u"}}]
    }"#;

    fn client_for(server: &MockServer) -> PokeApiClient {
        let cache = TtlCache::new(Duration::from_secs(60));
        PokeApiClient::new(ApiConfig::new(server.uri()), cache).unwrap()
    }

    #[test]
    fn test_config_trims_trailing_slash() {
        let config = ApiConfig::new("http://localhost:8080/api/v2/").with_timeout(5);
        assert_eq!(config.base_url, "http://localhost:8080/api/v2");
        assert_eq!(config.timeout_seconds, 5);
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Pikachu ").unwrap(), "pikachu");
        assert_eq!(normalize_name("mr-mime").unwrap(), "mr-mime");
        assert_eq!(normalize_name("25").unwrap(), "25");
        assert!(normalize_name("   ").is_err());
        assert!(normalize_name("../berry").is_err());
        assert!(normalize_name("a?b=c").is_err());
    }

    #[tokio::test]
    async fn test_second_request_served_from_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon/pikachu"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PIKACHU))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let first = client.pokemon("pikachu").await.unwrap();
        let second = client.pokemon("PIKACHU").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second.height, 4);
        assert_eq!(client.cache().stats().hits, 1);
    }

    #[tokio::test]
    async fn test_cache_keyed_by_full_url() {
        let server = MockServer::start().await;
        let client = client_for(&server);
        let url = format!("{}/pokemon/pikachu", server.uri());
        client.cache().add(url, PIKACHU);

        // No mock mounted: a network call would 404.
        let pokemon = client.pokemon("pikachu").await.unwrap();
        assert_eq!(pokemon.id, 25);
    }

    #[tokio::test]
    async fn test_error_status_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon/missingno"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        for _ in 0..2 {
            let err = client.pokemon("missingno").await.unwrap_err();
            assert!(err.is_not_found());
        }
        assert!(client.cache().is_empty());
    }

    #[tokio::test]
    async fn test_decode_error_surfaces() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/location-area/broken"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.location_area("broken").await.unwrap_err();
        assert!(matches!(err, PokedexError::Json(_)));
    }

    #[tokio::test]
    async fn test_location_area_pages() {
        let server = MockServer::start().await;
        let next = format!("{}/location-area/?offset=20&limit=20", server.uri());

        Mock::given(method("GET"))
            .and(path("/location-area/"))
            .and(query_param("offset", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"count": 40, "next": null, "previous": "PREV", "results": [{"name": "pastoria-city-area", "url": "u"}]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/location-area/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE_ONE.replace("NEXT", &next)))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let first = client.location_areas(None).await.unwrap();
        assert!(first.is_first());
        assert_eq!(first.next.as_deref(), Some(next.as_str()));
        assert_eq!(first.names().count(), 2);

        let second = client.location_areas(first.next.as_deref()).await.unwrap();
        assert!(second.is_last());
        assert_eq!(second.names().collect::<Vec<_>>(), vec!["pastoria-city-area"]);
    }

    #[tokio::test]
    async fn test_explore_area() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/location-area/canalave-city-area"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"id": 1, "name": "canalave-city-area", "pokemon_encounters": [{"pokemon": {"name": "tentacool", "url": "u"}}]}"#,
            ))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let area = client.location_area("canalave-city-area").await.unwrap();
        assert_eq!(area.pokemon_names().collect::<Vec<_>>(), vec!["tentacool"]);
    }

    #[tokio::test]
    async fn test_empty_name_rejected_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.pokemon("  ").await.unwrap_err();
        assert!(matches!(err, PokedexError::Validation(_)));
    }

    #[tokio::test]
    async fn test_connection_error_is_recoverable() {
        // Bind and release a port so nothing is listening on it.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let cache = TtlCache::new(Duration::from_secs(60));
        let config = ApiConfig::new(format!("http://127.0.0.1:{}", port)).with_timeout(2);
        let client = PokeApiClient::new(config, cache).unwrap();

        let err = client.pokemon("pikachu").await.unwrap_err();
        assert!(matches!(err, PokedexError::Http(_)), "unexpected error: {:?}", err);
        assert!(err.is_recoverable());
        assert!(client.cache().is_empty());
    }
}
