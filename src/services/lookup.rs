//! The weather submission flow: geocode, forecast, identify, record, format.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument};

use crate::db::Store;
use crate::models::weather::{DisplayWeather, format_weather_data};
use crate::services::ForecastSource;
use crate::services::identity::mint_user_id;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("City name is empty")]
    EmptyCity,

    #[error("City '{0}' not found")]
    CityNotFound(String),

    #[error("Could not retrieve weather data")]
    WeatherUnavailable,

    #[error("Failed to record search: {0}")]
    Storage(#[source] anyhow::Error),
}

impl LookupError {
    const fn outcome(&self) -> &'static str {
        match self {
            Self::EmptyCity => "empty_city",
            Self::CityNotFound(_) => "city_not_found",
            Self::WeatherUnavailable => "weather_unavailable",
            Self::Storage(_) => "storage_error",
        }
    }
}

/// Result of a successful lookup.
#[derive(Debug, Clone)]
pub struct LookupOutcome {
    pub weather: DisplayWeather,
    /// Either the caller's existing id or a freshly minted one.
    pub user_id: String,
    /// Trimmed city as submitted, not the geocoder's canonical name.
    pub city: String,
}

#[derive(Clone)]
pub struct WeatherLookupService {
    store: Store,
    source: Arc<dyn ForecastSource>,
}

impl WeatherLookupService {
    #[must_use]
    pub fn new(store: Store, source: Arc<dyn ForecastSource>) -> Self {
        Self { store, source }
    }

    /// Runs one lookup. A search is recorded only when both upstream calls
    /// succeed.
    #[instrument(skip(self, city, existing_user_id), fields(city = %city.trim()))]
    pub async fn lookup(
        &self,
        city: &str,
        existing_user_id: Option<String>,
    ) -> Result<LookupOutcome, LookupError> {
        let result = self.run(city.trim(), existing_user_id).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.outcome(),
        };
        metrics::counter!("weather_lookups_total", "outcome" => outcome).increment(1);

        result
    }

    async fn run(
        &self,
        city: &str,
        existing_user_id: Option<String>,
    ) -> Result<LookupOutcome, LookupError> {
        if city.is_empty() {
            return Err(LookupError::EmptyCity);
        }

        let location = self
            .source
            .geocode_city(city)
            .await
            .ok_or_else(|| LookupError::CityNotFound(city.to_string()))?;

        let forecast = self
            .source
            .get_weather(location.latitude, location.longitude)
            .await
            .ok_or(LookupError::WeatherUnavailable)?;

        let user_id = existing_user_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(mint_user_id);

        self.store
            .record_search(city, location.latitude, location.longitude, &user_id)
            .await
            .map_err(LookupError::Storage)?;

        info!(
            latitude = location.latitude,
            longitude = location.longitude,
            "Weather lookup succeeded"
        );

        Ok(LookupOutcome {
            weather: format_weather_data(&forecast, city),
            user_id,
            city: city.to_string(),
        })
    }
}
