use anyhow::Result;
use polyglotte::config::AppConfig;
use polyglotte::server::ServerBuilder;
use polyglotte::storage::Stores;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "polyglotte=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = AppConfig::load(std::env::args().nth(1))?;
    let stores = Stores::connect(&config.storage).await?;

    ServerBuilder::new(config).with_stores(stores).serve().await
}
