//! Free-text location lookup for the scene and scenario search panels.
//!
//! [`LocationSearch`] debounces keystrokes, ignores short queries and cancels
//! superseded lookups so only the latest query reports back.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Geocoder returned status {0}")]
    Status(u16),
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid coordinate in response: {0}")]
    InvalidCoordinate(String),
}

/// One candidate returned for a query
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeCandidate {
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
    pub class: String,
    pub kind: String,
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Candidates for `query`, best match first
    async fn search(&self, query: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError>;
}

#[derive(Debug, Clone)]
pub struct GeocodingConfig {
    pub endpoint: String,
    pub debounce: Duration,
    pub min_query_len: usize,
    pub result_limit: usize,
    pub user_agent: String,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debounce: Duration::from_millis(500),
            min_query_len: 3,
            result_limit: 5,
            user_agent: concat!("drivelab/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Raw Nominatim search hit; coordinates arrive as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    display_name: String,
    lat: String,
    lon: String,
    #[serde(default)]
    class: String,
    #[serde(default, rename = "type")]
    kind: String,
}

impl TryFrom<NominatimPlace> for GeocodeCandidate {
    type Error = GeocodeError;

    fn try_from(place: NominatimPlace) -> Result<Self, Self::Error> {
        let lat = place
            .lat
            .parse()
            .map_err(|_| GeocodeError::InvalidCoordinate(place.lat.clone()))?;
        let lon = place
            .lon
            .parse()
            .map_err(|_| GeocodeError::InvalidCoordinate(place.lon.clone()))?;
        Ok(Self {
            display_name: place.display_name,
            lat,
            lon,
            class: place.class,
            kind: place.kind,
        })
    }
}

/// Decode a Nominatim JSON search response
pub fn parse_nominatim(body: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
    let places: Vec<NominatimPlace> = serde_json::from_str(body)?;
    places.into_iter().map(GeocodeCandidate::try_from).collect()
}

pub struct NominatimGeocoder {
    client: reqwest::Client,
    endpoint: String,
    limit: usize,
}

impl NominatimGeocoder {
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            limit: config.result_limit,
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        let limit = self.limit.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query), ("format", "json"), ("limit", limit.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        parse_nominatim(&body)
    }
}

/// Outcome of a search submission
#[derive(Debug, Clone, PartialEq)]
pub enum SearchUpdate {
    /// Query too short; results should be emptied
    Cleared,
    Results {
        query: String,
        candidates: Vec<GeocodeCandidate>,
    },
    Failed {
        query: String,
        error: String,
    },
}

/// Debounced search front-end shared by the location panels
pub struct LocationSearch {
    geocoder: Arc<dyn Geocoder>,
    debounce: Duration,
    min_query_len: usize,
    pending: Option<CancellationToken>,
}

impl LocationSearch {
    pub fn new(geocoder: Arc<dyn Geocoder>, config: &GeocodingConfig) -> Self {
        Self {
            geocoder,
            debounce: config.debounce,
            min_query_len: config.min_query_len,
            pending: None,
        }
    }

    /// Submit the latest query text. Any earlier lookup still waiting or in
    /// flight is cancelled.
    pub fn submit(&mut self, query: &str, updates: mpsc::UnboundedSender<SearchUpdate>) {
        self.cancel();

        let query = query.trim().to_string();
        if query.chars().count() < self.min_query_len {
            let _ = updates.send(SearchUpdate::Cleared);
            return;
        }

        let token = CancellationToken::new();
        self.pending = Some(token.clone());
        let geocoder = self.geocoder.clone();
        let debounce = self.debounce;

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(debounce) => {}
            }
            let result = tokio::select! {
                _ = token.cancelled() => return,
                result = geocoder.search(&query) => result,
            };
            let update = match result {
                Ok(candidates) => SearchUpdate::Results { query, candidates },
                Err(e) => {
                    tracing::warn!(query = %query, error = %e, "Geocoding failed");
                    SearchUpdate::Failed {
                        query,
                        error: e.to_string(),
                    }
                }
            };
            let _ = updates.send(update);
        });
    }

    /// Cancel the pending lookup, if any
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

impl Drop for LocationSearch {
    fn drop(&mut self) {
        self.cancel();
    }
}
