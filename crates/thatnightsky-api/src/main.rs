use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use thatnightsky_core::config::{LayeredConfig, Secrets};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use thatnightsky_api::{cors_layer, create_router, ApiConfig, AppState};

/// Optional TOML file with chart settings
const CONFIG_FILE: &str = "thatnightsky.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "thatnightsky_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_config = ApiConfig::from_env();

    let mut config = LayeredConfig::with_defaults();
    let config_file = Path::new(CONFIG_FILE);
    if config_file.exists() {
        config = config
            .load_from_file(config_file)
            .with_context(|| format!("Failed to read {}", config_file.display()))?;
    }
    let config = config.load_from_env();
    let secrets = Secrets::from_env();

    tracing::info!(
        port = api_config.port,
        catalogue = %config.catalogue_path.value.display(),
        geocoder_key = secrets.vworld_api_key.is_some(),
        narrative_key = secrets.anthropic_api_key.is_some(),
        "Starting ThatNightSky API server"
    );

    // No chart can be drawn without the catalogue, so it loads before binding
    let state = AppState::from_config(&config, &secrets).context(
        "Failed to load the star catalogue. Check THATNIGHTSKY_CATALOGUE_PATH and \
         THATNIGHTSKY_CONSTELLATION_PATH",
    )?;
    tracing::info!(stars = state.catalogue().len(), "Catalogue loaded");

    let app = create_router(Arc::new(state)).layer(cors_layer(&api_config)?);

    let addr = api_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", api_config.cors_origin);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
