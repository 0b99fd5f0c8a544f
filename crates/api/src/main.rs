mod config;
mod metrics;
mod routes;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{LogFormat, ServerConfig};
use extract::{NerConfig, TaskPredictor};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "api=info,extract=info,tower_http=info".into());

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine, the variables may come from the environment
    let _ = dotenvy::dotenv();

    let server = ServerConfig::from_env()?;
    init_tracing(server.log_format);

    let ner_config = NerConfig::from_env()?;
    info!(models = ?ner_config.models.as_slice(), "Model priority configured");

    let predictor = TaskPredictor::from_config(&ner_config)?;
    let app = routes::router(routes::AppState::new(predictor, server.model_version.clone()));

    let addr = server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
