//! Geocoder client - resolves a free-text address to coordinates.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::Config;
use crate::domain::GeoPoint;
use crate::errors::{AppError, AppResult};

/// Geocoding abstraction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve an address to coordinates, or fail with a
    /// `GeoResolution` error when no location matches.
    async fn resolve(&self, address: &str) -> AppResult<GeoPoint>;
}

/// positionstack forward-geocoding client.
pub struct PositionStack {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PositionStack {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.geocoder_base_url.clone(),
            api_key: config.geocoder_api_key.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ForwardResponse {
    #[serde(default)]
    data: Vec<ForwardHit>,
}

#[derive(Debug, Deserialize)]
struct ForwardHit {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[async_trait]
impl Geocoder for PositionStack {
    async fn resolve(&self, address: &str) -> AppResult<GeoPoint> {
        let url = format!("{}/forward", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("access_key", self.api_key.as_str()), ("query", address)])
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("geocoder request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::upstream(format!(
                "geocoder returned status {}",
                response.status()
            )));
        }

        let body: ForwardResponse = response
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("geocoder returned invalid body: {}", e)))?;

        // A lookup miss is a client-visible 422, not an upstream outage
        let hit = body.data.first().ok_or_else(no_location_found)?;
        match (hit.latitude, hit.longitude) {
            (Some(lat), Some(lng)) => Ok(GeoPoint { lat, lng }),
            _ => Err(no_location_found()),
        }
    }
}

fn no_location_found() -> AppError {
    AppError::geo_resolution("could not find the location for the given address")
}
