//! Web server for the bankruptcy prediction explorer
//!
//! Serves a single page showing one randomly chosen company from the
//! predictions CSV, plus a small JSON API.

mod api;
mod error;
mod handlers;
mod page;
mod state;

pub use api::create_router;
pub use error::ServerError;
pub use handlers::parse_index;
pub use page::render_selection;
pub use state::AppState;

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Application base directory
    pub base_dir: PathBuf,
    /// Predictions CSV, relative to `base_dir` unless absolute
    pub data_file: PathBuf,
    /// Seed for reproducible sampling; thread RNG when unset
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_dir: std::env::var("BASE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            data_file: std::env::var("DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data").join("predictions.csv")),
            seed: std::env::var("SAMPLE_SEED").ok().and_then(|s| s.parse().ok()),
        }
    }
}

impl ServerConfig {
    /// Full path of the predictions CSV
    pub fn data_path(&self) -> PathBuf {
        self.base_dir.join(&self.data_file)
    }
}

/// Bind the configured host, which may be a hostname or an IP literal
async fn bind_listener(config: &ServerConfig) -> std::io::Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await
}

/// Start the server with the given configuration
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let start_time = chrono::Utc::now();
    let data_path = config.data_path();

    if !data_path.exists() {
        warn!(path = %data_path.display(), "Predictions file not found, requests will fail until it exists");
    }

    let state = Arc::new(AppState::new(config.clone()));
    let app = create_router(state);

    info!(
        host = %config.host,
        port = config.port,
        data = %data_path.display(),
        seeded = config.seed.is_some(),
        started_at = %start_time.to_rfc3339(),
        "Bankruptcy explorer starting"
    );

    let listener = bind_listener(&config).await?;
    let addr = listener.local_addr()?;
    info!(url = %format!("http://{}", addr), pid = std::process::id(), "Server listening");

    let shutdown_signal = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for ctrl+c");
            return;
        }
        let uptime = chrono::Utc::now().signed_duration_since(start_time);
        info!(uptime_secs = uptime.num_seconds(), "Shutdown signal received, stopping server");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shut down cleanly");
    Ok(())
}
