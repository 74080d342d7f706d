use std::sync::Arc;

use anyhow::Context;

use graindash_api::{build_app, ApiConfig, AppServices};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env()?;
    graindash_observability::init(config.log_format);

    let services = AppServices::from_config(&config)?;
    let app = build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, seed_demo = config.seed_demo_data, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
