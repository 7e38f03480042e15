use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use dentbook::config::AppConfig;
use dentbook::routes::build_router;
use dentbook::services::ids::UuidGenerator;
use dentbook::services::ledger::Ledger;
use dentbook::services::seed;
use dentbook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let mut ledger =
        Ledger::new(Box::new(UuidGenerator)).with_duration_policy(config.duration_policy);
    if config.seed_demo_data {
        seed::seed_demo_patients(&mut ledger)?;
    }
    tracing::info!(
        duration_policy = config.duration_policy.as_str(),
        "ledger ready"
    );

    let state = Arc::new(AppState::new(ledger, config.clone()));
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
