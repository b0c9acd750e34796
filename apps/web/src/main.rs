#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use exoscope_web::{config::Config, construct_router, state::State};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Starting exoscope web front end");

    let config = Config::from_env()?;
    tracing::info!(
        classification = %config.endpoints.classification_url,
        habitability = %config.endpoints.habitability_url,
        explanation = %config.endpoints.explanation_url,
        "Loaded configuration"
    );

    let state = Arc::new(State::new(&config.endpoints)?);
    let app = construct_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
