use std::sync::Arc;

use crate::clients::open_meteo::OpenMeteoClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::{ForecastSource, WeatherLookupService};

/// Everything a request or background job needs, built once at startup.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub forecast: Arc<dyn ForecastSource>,

    pub lookup: WeatherLookupService,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let client = OpenMeteoClient::new(&config.weather)?;
        Self::with_forecast_source(config, Arc::new(client)).await
    }

    /// Builds the state around a caller-supplied forecast source.
    pub async fn with_forecast_source(
        config: Config,
        forecast: Arc<dyn ForecastSource>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let lookup = WeatherLookupService::new(store.clone(), forecast.clone());

        Ok(Self {
            config: Arc::new(config),
            store,
            forecast,
            lookup,
        })
    }
}
