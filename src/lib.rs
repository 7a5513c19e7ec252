pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod db;
pub mod entities;
pub mod models;
pub mod scheduler;
pub mod services;
pub mod state;

use anyhow::Context;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
pub use config::Config;
use scheduler::Scheduler;
use state::SharedState;

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    config.validate()?;

    let prometheus_handle = init_observability(&config)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(config, prometheus_handle).await,

        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("config.toml already exists, leaving it untouched.");
            }
            Ok(())
        }

        Commands::Lookup { city, user_id } => {
            cli::cmd_lookup(config, &city.join(" "), user_id).await
        }

        Commands::History { user_id } => cli::cmd_history(&config, &user_id).await,

        Commands::Cities { query } => cli::cmd_cities(&config, &query).await,

        Commands::Stats => cli::cmd_stats(&config).await,

        Commands::Prune { days } => cli::cmd_prune(&config, days).await,
    }
}

fn init_observability(config: &Config) -> anyhow::Result<Option<PrometheusHandle>> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let prometheus_handle = if config.observability.metrics_enabled {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        api::observability::describe_metrics();
        Some(handle)
    } else {
        None
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer());

    if config.observability.loki_enabled {
        let url = url::Url::parse(&config.observability.loki_url).context("Invalid Loki URL")?;

        let (layer, task) = tracing_loki::builder()
            .label("app", "weatherboard")?
            .build_url(url)?;

        tokio::spawn(task);

        registry.with(layer).init();
        info!(
            "Loki logging initialized at {}",
            config.observability.loki_url
        );
    } else {
        registry.init();
    }

    if prometheus_handle.is_some() {
        info!("Prometheus metrics recorder initialized");
    }

    Ok(prometheus_handle)
}

async fn run_server(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()> {
    info!("Weatherboard v{} starting...", env!("CARGO_PKG_VERSION"));

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);

    let shared = Arc::new(SharedState::new(config).await?);
    let store = shared.store.clone();

    let mut scheduler = Scheduler::new(store.clone(), shared.config.history.clone());
    scheduler.start().await?;

    let app = api::router(api::create_app_state(shared, prometheus_handle)?);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Web server running at http://{}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Web server error: {}", e);
    }

    scheduler.stop().await;
    store.close().await?;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}
