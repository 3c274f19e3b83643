use anyhow::Context;
use dealbot::core::config::AppConfig;
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dealbot::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        e
    })?;

    dealbot::app::run(&config)
        .await
        .context("failed to start scraping run")?;

    Ok(())
}
