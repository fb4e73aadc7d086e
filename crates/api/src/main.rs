//! Process entry point: wires the consumer loop and the query API.

use std::sync::Arc;

use api::{AppState, Config};
use projector::{
    ANSWERS_TOPIC, EnrichmentClient, LogDeadLetterSink, MessageProcessor, Projector,
};
use read_store::{AnswerStore, InMemoryAnswerStore, PostgresAnswerStore};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

/// Connects the configured storage backend. Unreachable storage is fatal.
async fn connect_store(config: &Config) -> Arc<dyn AnswerStore> {
    match &config.storage_url {
        Some(url) => {
            let store = match PostgresAnswerStore::connect(url, &config.storage_db).await {
                Ok(store) => store,
                Err(error) => {
                    tracing::error!(%error, "cannot connect to storage");
                    std::process::exit(1);
                }
            };
            if let Err(error) = store.run_migrations().await {
                tracing::error!(%error, "cannot prepare storage schema");
                std::process::exit(1);
            }
            tracing::info!(db = %config.storage_db, "connected to PostgreSQL storage");
            Arc::new(store)
        }
        None => {
            tracing::warn!("STORAGE_URL not set, running on the in-memory store");
            Arc::new(InMemoryAnswerStore::new())
        }
    }
}

#[tokio::main]
async fn main() {
    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let prometheus_builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let metrics_handle = prometheus_builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Load configuration and connect storage (fatal on failure)
    let config = Config::from_env();
    let store = connect_store(&config).await;

    // 4. Build the projection pipeline
    let enrichment =
        match EnrichmentClient::new(&config.enrichment_url, config.enrichment_timeout) {
            Ok(client) => client,
            Err(error) => {
                tracing::error!(%error, "cannot build enrichment client");
                std::process::exit(1);
            }
        };
    let projector = Projector::new(enrichment, store.clone(), config.display_name_format);
    let processor = MessageProcessor::new(projector, Arc::new(LogDeadLetterSink));

    // 5. Start the consumer loop on its own task
    tracing::info!(
        brokers = ?config.broker_addresses,
        topic = ANSWERS_TOPIC,
        "initializing consumer"
    );
    let (ingress, source) = projector::channel(ANSWERS_TOPIC, 256);
    tokio::spawn(async move {
        if let Err(error) = processor.consume(&source).await {
            tracing::error!(%error, "consumer stopped");
        }
    });
    // The broker transport adapter owns this handle; it stays alive for
    // the life of the process so the topic stream never closes early.
    let _ingress = ingress;

    // 6. Serve the query API
    let state = Arc::new(AppState { store });
    let app = api::create_app(state, metrics_handle);

    let addr = config.addr();
    tracing::info!(%addr, "starting query API server");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, %addr, "cannot bind listener");
            std::process::exit(1);
        }
    };

    if let Err(error) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(%error, "server error");
        std::process::exit(1);
    }

    tracing::info!("server shut down gracefully");
}
