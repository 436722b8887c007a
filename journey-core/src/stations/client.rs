//! Nearby-places API client.

use serde_json::Value;

use crate::geo::CoordinatePoint;

use super::error::StationError;

/// Configuration for the places API client.
#[derive(Debug, Clone)]
pub struct PlacesClientConfig {
    /// Base URL of the places API (the `findPlacesByLocation` endpoint is
    /// appended to it).
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PlacesClientConfig {
    /// Create a new config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }

    /// Set a custom timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Client for the nearby-places endpoint.
#[derive(Debug, Clone)]
pub struct PlacesClient {
    http: reqwest::Client,
    base_url: String,
}

impl PlacesClient {
    /// Create a new places client.
    pub fn new(config: PlacesClientConfig) -> Result<Self, StationError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch station-like places around a location.
    ///
    /// The endpoint answers with either a bare JSON array or a
    /// `{"stations": [...]}` wrapper; both come back as the raw candidate
    /// list, ready for ranking.
    pub async fn find_places_by_location(
        &self,
        location: CoordinatePoint,
        limit: u32,
    ) -> Result<Vec<Value>, StationError> {
        let url = format!("{}/findPlacesByLocation", self.base_url);
        let body = serde_json::json!({
            "latitude": location.lat,
            "longitude": location.lon,
            "limit": limit,
        });

        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body).map_err(|e| StationError::Json {
            message: e.to_string(),
        })?;

        extract_candidates(value)
    }
}

/// Unwrap the two response shapes into a candidate list.
fn extract_candidates(value: Value) -> Result<Vec<Value>, StationError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut obj) => match obj.remove("stations") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(StationError::Json {
                message: "expected an array or an object with a \"stations\" array".to_string(),
            }),
        },
        _ => Err(StationError::Json {
            message: "expected an array or an object with a \"stations\" array".to_string(),
        }),
    }
}
