use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::config::WeatherConfig;
use crate::constants::open_meteo::{CURRENT_FIELDS, FORECAST_DAYS, HOURLY_FIELDS};
use crate::models::weather::{ForecastPayload, Location};

/// Failure modes of a single Open-Meteo call. Never leaves this module:
/// the public methods log it and return `None`.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    Status(StatusCode),

    #[error("Invalid response body: {0}")]
    Parse(String),

    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<Location>>,
}

#[derive(Clone)]
pub struct OpenMeteoClient {
    client: Client,
    geocoding_url: String,
    forecast_url: String,
    language: String,
}

impl OpenMeteoClient {
    /// Creates a client with the configured endpoints and request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &WeatherConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(concat!("Weatherboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
            language: config.language.clone(),
        })
    }

    /// First geocoder match for `name`, or `None` when there is no match or the
    /// call fails.
    pub async fn geocode_city(&self, name: &str) -> Option<Location> {
        match self.try_geocode(name).await {
            Ok(location) => {
                if location.is_none() {
                    debug!(city = %name, "Geocoder returned no results");
                }
                location
            }
            Err(e) => {
                warn!(city = %name, error = %e, "Geocoding request failed");
                None
            }
        }
    }

    /// Current conditions and today's hourly series, or `None` when the call
    /// fails or the body is missing required fields.
    pub async fn get_weather(&self, latitude: f64, longitude: f64) -> Option<ForecastPayload> {
        match self.try_forecast(latitude, longitude).await {
            Ok(payload) => Some(payload),
            Err(e) => {
                warn!(latitude, longitude, error = %e, "Forecast request failed");
                None
            }
        }
    }

    async fn try_geocode(&self, name: &str) -> Result<Option<Location>, WeatherError> {
        let mut url = Url::parse(&self.geocoding_url)?;
        url.query_pairs_mut()
            .append_pair("name", name)
            .append_pair("count", "1")
            .append_pair("language", &self.language);

        let response: GeocodingResponse = self.get_json(url).await?;

        Ok(response.results.and_then(|r| r.into_iter().next()))
    }

    async fn try_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastPayload, WeatherError> {
        let mut url = Url::parse(&self.forecast_url)?;
        url.query_pairs_mut()
            .append_pair("latitude", &latitude.to_string())
            .append_pair("longitude", &longitude.to_string())
            .append_pair("current", CURRENT_FIELDS)
            .append_pair("hourly", HOURLY_FIELDS)
            .append_pair("forecast_days", &FORECAST_DAYS.to_string());

        self.get_json(url).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, WeatherError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(WeatherError::Status(status));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| WeatherError::Parse(e.to_string()))
    }
}
