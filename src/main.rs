use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use wingman::ask::AskService;
use wingman::cache::DatasetCache;
use wingman::openai::OpenAiClient;
use wingman::question::TitleExtractor;
use wingman::{run_server, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env();
    if config.openai_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; /api/ask will fail until it is");
    }

    let generator = OpenAiClient::new(
        config.openai_base_url.clone(),
        Duration::from_secs(config.limits.generator_timeout_secs),
    )?;
    let extractor = Arc::new(TitleExtractor::new()?);
    let ask = AskService::new(config.clone(), DatasetCache::new(), extractor, generator);

    run_server(config, ask).await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
