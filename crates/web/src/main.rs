use std::sync::Arc;

use anyhow::Context;
use registration::{PngQrEncoder, RegistrationPipeline, WebhookSheetSink, collaborator_from_config};
use storage::{JsonFileStore, KeyValueStore};
use web::config::Config;
use web::middleware::auth::AdminCredentials;
use web::{AppState, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting GWellth registration API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!("Loading participant data from: {}", config.data_file.display());
    let kv: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(&config.data_file));

    let ai_config = config.ai_config();
    let timeout = ai_config.timeout;
    let ai = collaborator_from_config(ai_config).context("Failed to initialize AI client")?;
    let sheets = WebhookSheetSink::new(timeout).context("Failed to initialize webhook client")?;
    let pipeline = RegistrationPipeline::new(Arc::new(PngQrEncoder::default()), ai, Arc::new(sheets));

    let admin = AdminCredentials::from_comma_separated(&config.admin_credentials);
    if admin.is_empty() {
        tracing::warn!("ADMIN_CREDENTIALS is empty; admin endpoints will reject every request");
    }

    let state = AppState::load(kv, pipeline, admin)
        .await
        .context("Failed to load participant data")?;
    tracing::info!("Loaded {} participant(s)", state.store.read().await.len());

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);

    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, build_router(state)).await?;

    Ok(())
}
