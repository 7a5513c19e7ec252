use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::SharedState;
use views::Views;

mod assets;
mod cities;
pub mod cookies;
mod error;
mod health;
pub mod observability;
mod pages;
mod types;
pub mod views;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,

    pub views: Arc<Views>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn lookup(&self) -> &crate::services::WeatherLookupService {
        &self.shared.lookup
    }

    #[must_use]
    pub fn views(&self) -> &Views {
        &self.views
    }
}

pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    Ok(Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
        views: Arc::new(Views::new()?),
    }))
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    create_app_state(shared, prometheus_handle)
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = &state.config().server.cors_allowed_origins;

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    let api_router = Router::new()
        .route("/cities", get(cities::autocomplete))
        .route("/stats", get(cities::stats))
        .route("/health/live", get(health::health_live))
        .route("/health/ready", get(health::health_ready));

    Router::new()
        .route("/", get(pages::index))
        .route("/weather", post(pages::weather))
        .route("/history", get(pages::history))
        .route("/error", get(pages::error_page))
        .route("/metrics", get(observability::get_metrics))
        .route("/static/{*path}", get(assets::serve_asset))
        .nest("/api", api_router)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            error::render_error_pages,
        ))
        .route_layer(middleware::from_fn(observability::logging_middleware))
        .with_state(state)
        .layer(
            cors_layer
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(
            observability::security_headers_middleware,
        ))
}
