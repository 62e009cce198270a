//! Fieldmap Server
//!
//! HTTP transport for the mapping service.
//!
//! - `POST /api/mappings/suggest` (also `POST /`): score fields or record feedback
//! - `GET /health`: liveness and collaborator configuration

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use fieldmap_domain::traits::CompletionProvider;
use fieldmap_llm::{LlmError, OpenAiProvider};
use fieldmap_scoring::CandidateRanker;
use fieldmap_store::{SqliteStore, StoreError};
use fieldmap_suggester::MappingService;
use handlers::{create_router, AppState};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Feedback store could not be opened
    #[error("Failed to open feedback store: {0}")]
    Store(#[from] StoreError),

    /// Completion provider could not be created
    #[error("Failed to create completion provider: {0}")]
    Provider(#[from] LlmError),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// The service type served in production
pub type ProductionService = MappingService<OpenAiProvider, SqliteStore>;

/// Build the mapping service described by `config`
///
/// A provider that reports missing configuration is skipped with a warning;
/// the server then answers with rule-based suggestions.
pub fn build_service(config: &ServerConfig) -> Result<ProductionService, ServerError> {
    let mut service = MappingService::new(CandidateRanker::new(config.scoring));

    if let Some(openai) = config.openai_config() {
        match OpenAiProvider::new(openai) {
            Ok(provider) => {
                info!("AI suggestions enabled with model {}", provider.model_name());
                service = service.with_provider(provider);
            }
            Err(LlmError::NotConfigured(reason)) => {
                warn!("AI suggestions disabled: {}", reason);
            }
            Err(e) => return Err(e.into()),
        }
    } else {
        info!("No completion provider configured; serving rule-based suggestions only");
    }

    if let Some(store) = &config.store {
        info!("Feedback store: {}", store.path.display());
        service = service.with_store(SqliteStore::new(&store.path)?);
    } else {
        warn!("No feedback store configured; feedback will be acknowledged but not stored");
    }

    Ok(service)
}

/// Start the HTTP server
///
/// Initializes logging, builds the service and serves until Ctrl-C.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    info!("Starting Fieldmap server");
    info!("Bind address: {}", config.bind_addr());

    let service = build_service(&config)?;
    let app = create_router(AppState::new(service));

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
