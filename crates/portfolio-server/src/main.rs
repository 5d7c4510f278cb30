mod config;
mod error;
mod server;

use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("starting portfolio server");

    let config = Config::from_env()?;
    info!(
        data_path = %config.data_path,
        bind_addr = %config.bind_addr,
        static_assets = config.static_dir.is_some(),
        "configuration loaded"
    );

    server::serve(&config).await
}
