use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;

pub const DEFAULT_DATASET_PATH: &str = "data/games.csv";

#[derive(Clone, Debug)]
pub struct ModelConfig {
    pub answer_model: String,
}

#[derive(Clone, Debug)]
pub struct LimitConfig {
    pub max_output_tokens: usize,
    pub max_question_chars: usize,
    pub generator_timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub data_path: Option<PathBuf>,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub models: ModelConfig,
    pub limits: LimitConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("WINGMAN_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string()),
            data_path: optional_env("DATA_PATH").map(PathBuf::from),
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            models: ModelConfig {
                answer_model: env::var("ANSWER_MODEL")
                    .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            },
            limits: LimitConfig {
                max_output_tokens: env::var("MAX_OUTPUT_TOKENS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1_024),
                max_question_chars: env::var("MAX_QUESTION_CHARS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(2_000),
                generator_timeout_secs: env::var("GENERATOR_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60),
            },
        }
    }

    pub fn require_api_key(&self) -> Result<&str> {
        match self.openai_api_key.as_deref() {
            Some(key) => Ok(key),
            None => anyhow::bail!("missing required environment variable: OPENAI_API_KEY"),
        }
    }

    /// Explicit path wins over `DATA_PATH`, which wins over the built-in default.
    /// Relative paths are anchored at the current working directory.
    pub fn dataset_path(&self, explicit: Option<&Path>) -> PathBuf {
        let chosen = explicit
            .map(Path::to_path_buf)
            .or_else(|| self.data_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH));

        if chosen.is_absolute() {
            return chosen;
        }
        match env::current_dir() {
            Ok(cwd) => cwd.join(chosen),
            Err(_) => chosen,
        }
    }
}

fn optional_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
