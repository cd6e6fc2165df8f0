use anyhow::{Context, Result};

use skipper::{cli::config_path_from_args, config::Config, logging::init_tracing, server};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = config_path_from_args()?;
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    let logging_guard = init_tracing(&config.logging).context("failed to initialize logging")?;
    tracing::info!(
        target: "skipper",
        run_id = %logging_guard.run_id(),
        config = %config_path.display(),
        "starting"
    );

    server::run(config).await
}
