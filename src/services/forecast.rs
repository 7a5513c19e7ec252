//! Seam between the lookup flow and the upstream weather provider.

use async_trait::async_trait;

use crate::clients::open_meteo::OpenMeteoClient;
use crate::models::weather::{ForecastPayload, Location};

/// Resolves city names and fetches forecasts.
///
/// Implementations swallow their own failures: `None` means "no usable answer",
/// whether the city is unknown or the upstream is down.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn geocode_city(&self, name: &str) -> Option<Location>;

    async fn get_weather(&self, latitude: f64, longitude: f64) -> Option<ForecastPayload>;
}

#[async_trait]
impl ForecastSource for OpenMeteoClient {
    async fn geocode_city(&self, name: &str) -> Option<Location> {
        Self::geocode_city(self, name).await
    }

    async fn get_weather(&self, latitude: f64, longitude: f64) -> Option<ForecastPayload> {
        Self::get_weather(self, latitude, longitude).await
    }
}
