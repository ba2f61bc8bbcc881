use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wingman::ask::AskService;
use wingman::cache::DatasetCache;
use wingman::config::AppConfig;
use wingman::facts::render_fact;
use wingman::openai::OpenAiClient;
use wingman::question::TitleExtractor;

#[derive(Parser, Debug)]
#[command(name = "ask")]
#[command(about = "Ask a video game question, grounded on the local games dataset")]
struct Cli {
    /// Dataset path; overrides DATA_PATH and the built-in default.
    #[arg(long)]
    data: Option<PathBuf>,
    /// Print the extracted title and verified facts without calling the model.
    #[arg(long, default_value_t = false)]
    facts_only: bool,
    #[arg(required = true)]
    question: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let question = cli.question.join(" ");
    if question.trim().is_empty() {
        anyhow::bail!("question must not be empty");
    }

    let config = AppConfig::from_env();
    let generator = OpenAiClient::new(
        config.openai_base_url.clone(),
        Duration::from_secs(config.limits.generator_timeout_secs),
    )?;
    let mut ask = AskService::new(
        config,
        DatasetCache::new(),
        Arc::new(TitleExtractor::new()?),
        generator,
    );
    if let Some(path) = cli.data {
        ask = ask.with_dataset_path(path);
    }

    if cli.facts_only {
        match ask.extract_title(&question) {
            Some(title) => println!("title: {title}"),
            None => println!("title: <none>"),
        }
        match ask.ground(&question).await {
            Some(fact) => println!("facts: {}", render_fact(&fact)),
            None => println!("facts: <no grounding available>"),
        }
        return Ok(());
    }

    let outcome = ask.answer(&question).await?;
    if let Some(fact) = &outcome.fact {
        println!("[grounded] {}", render_fact(fact));
    }
    println!("{}", outcome.answer);
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
