//! weather-gateway server entry point.
//!
//! Starts the Axum HTTP server with the REST endpoints.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use weather_gateway::api;
use weather_gateway::app_state::AppState;
use weather_gateway::config::GatewayConfig;
use weather_gateway::persistence::{MemoryLedger, PostgresLedger, SearchLedger};
use weather_gateway::provider::{OpenWeatherClient, WeatherProvider};
use weather_gateway::service::retention::spawn_retention_task;
use weather_gateway::service::{HistoryWriter, WeatherService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (also reads .env)
    let config = GatewayConfig::from_env()?;

    // Initialize tracing
    init_tracing(config.log_json);
    tracing::info!(addr = %config.listen_addr, "starting weather-gateway");
    if config.weather_api_key.is_none() {
        tracing::warn!("WEATHER_API_KEY is not set; weather lookups will fail");
    }

    // Build persistence layer
    let ledger: Arc<dyn SearchLedger> = if config.persistence_enabled {
        Arc::new(
            PostgresLedger::connect(&config)
                .await
                .context("invalid DATABASE_URL")?,
        )
    } else {
        tracing::info!("persistence disabled; search history kept in memory");
        Arc::new(MemoryLedger::new())
    };

    // Build provider and service layer
    let provider: Arc<dyn WeatherProvider> = Arc::new(
        OpenWeatherClient::new(
            &config.weather_base_url,
            config.weather_api_key.clone(),
            Duration::from_secs(config.provider_timeout_secs),
        )
        .context("failed to build weather provider client")?,
    );
    let (history, history_handle) =
        HistoryWriter::spawn(Arc::clone(&ledger), config.history_queue_capacity);
    let retention = spawn_retention_task(
        Arc::clone(&ledger),
        config.history_retention_days,
        Duration::from_secs(config.history_cleanup_interval_secs),
    );
    let weather_service = Arc::new(WeatherService::new(provider, history));

    // Build application state
    let app_state = AppState {
        weather_service,
        ledger,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(api::timeout_layer(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(api::cors_layer(&config.allowed_origins))
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router (and every HistoryWriter clone) is gone; flush the queue.
    if let Some(task) = retention {
        task.abort();
    }
    history_handle
        .drain(Duration::from_secs(config.shutdown_drain_timeout_secs))
        .await;

    tracing::info!("shutdown complete");
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
