use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use serde_json::Value;

use crate::cache::DatasetCache;
use crate::config::AppConfig;
use crate::facts::render_fact;
use crate::models::{AskRequest, GameFact};
use crate::openai::OpenAiClient;
use crate::question::TitleExtractor;
use crate::resolve::build_fact;

const SYSTEM_PROMPT: &str = "You are a helpful video game expert. Answer the user's question \
about video games accurately and concisely. If you are not sure, say so. Keep answers focused \
and avoid unnecessary detail unless asked.";

#[derive(Debug, Clone)]
pub struct AskOutcome {
    pub answer: String,
    pub fact: Option<GameFact>,
}

#[derive(Clone)]
pub struct AskService {
    config: AppConfig,
    cache: DatasetCache,
    extractor: Arc<TitleExtractor>,
    generator: OpenAiClient,
    dataset_path: Option<PathBuf>,
}

impl AskService {
    pub fn new(
        config: AppConfig,
        cache: DatasetCache,
        extractor: Arc<TitleExtractor>,
        generator: OpenAiClient,
    ) -> Self {
        Self {
            config,
            cache,
            extractor,
            generator,
            dataset_path: None,
        }
    }

    /// Pin the dataset to an explicit path, ahead of `DATA_PATH` and the default.
    pub fn with_dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset_path = Some(path.into());
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn extract_title(&self, question: &str) -> Option<String> {
        self.extractor.extract(question)
    }

    /// Verified facts for the game named in the question, if any.
    pub async fn ground(&self, question: &str) -> Option<GameFact> {
        let title = self.extract_title(question)?;
        let path = self.config.dataset_path(self.dataset_path.as_deref());
        let records = self.cache.records(&path).await;

        let fact = build_fact(&records, &title);
        match &fact {
            Some(fact) => tracing::debug!("grounding '{}' on {}", title, fact.platform),
            None => tracing::debug!("no dataset match for '{}'", title),
        }
        fact
    }

    pub async fn answer(&self, question: &str) -> Result<AskOutcome> {
        let started = Instant::now();
        let api_key = self.config.require_api_key()?;

        let fact = self.ground(question).await;
        let system = build_system_message(fact.as_ref());

        let answer = self
            .generator
            .complete(
                api_key,
                &self.config.models.answer_model,
                &system,
                question,
                self.config.limits.max_output_tokens,
            )
            .await?;

        tracing::info!(
            "answered question grounded={} in {}ms",
            fact.is_some(),
            started.elapsed().as_millis()
        );
        Ok(AskOutcome { answer, fact })
    }
}

/// Accept only `{ "question": <non-blank string> }`; the question is trimmed.
pub fn parse_ask_body(body: &Value) -> Option<AskRequest> {
    let question = body.as_object()?.get("question")?.as_str()?.trim();
    if question.is_empty() {
        return None;
    }
    Some(AskRequest {
        question: question.to_string(),
    })
}

pub fn build_system_message(fact: Option<&GameFact>) -> String {
    match fact {
        Some(fact) => format!(
            "{SYSTEM_PROMPT}\n\nWhen relevant, use this verified data: {}",
            render_fact(fact)
        ),
        None => SYSTEM_PROMPT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::config::{LimitConfig, ModelConfig};
    use crate::dataset::parse_games;

    const DATASET: &str = "title,console,genre,publisher,developer,release_date,critic_score\n\
        Grand Theft Auto V,PS4,Action,Rockstar Games,Rockstar North,18-11-2014,9.7\n\
        Grand Theft Auto V,PS3,Action,Rockstar Games,Rockstar North,17-09-2013,9.4\n\
        Grand Theft Auto V,XOne,Action,Rockstar Games,Rockstar North,18-11-2014,\n\
        Hollow Knight,PC,Metroidvania,Team Cherry,Team Cherry,24-02-2017,\n";

    fn service() -> AskService {
        let config = AppConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            data_path: None,
            openai_api_key: None,
            openai_base_url: "http://127.0.0.1:9".to_string(),
            models: ModelConfig {
                answer_model: "test-model".to_string(),
            },
            limits: LimitConfig {
                max_output_tokens: 16,
                max_question_chars: 2_000,
                generator_timeout_secs: 1,
            },
        };
        let cache = DatasetCache::seeded("/seeded/games.csv", parse_games(DATASET));
        let generator =
            OpenAiClient::new(config.openai_base_url.clone(), Duration::from_secs(1)).unwrap();
        AskService::new(
            config,
            cache,
            Arc::new(TitleExtractor::new().unwrap()),
            generator,
        )
        .with_dataset_path("/seeded/games.csv")
    }

    #[test]
    fn body_requires_non_blank_string_question() {
        assert_eq!(
            parse_ask_body(&json!({ "question": "  trimmed  " })),
            Some(AskRequest {
                question: "trimmed".to_string()
            })
        );
        assert_eq!(parse_ask_body(&json!(null)), None);
        assert_eq!(parse_ask_body(&json!("string")), None);
        assert_eq!(parse_ask_body(&json!(42)), None);
        assert_eq!(parse_ask_body(&json!({})), None);
        assert_eq!(parse_ask_body(&json!({ "question": 123 })), None);
        assert_eq!(parse_ask_body(&json!({ "question": "   " })), None);
    }

    #[test]
    fn system_message_without_fact_is_plain_prompt() {
        assert_eq!(build_system_message(None), SYSTEM_PROMPT);
    }

    #[tokio::test]
    async fn grounds_multi_platform_title() {
        let svc = service();
        let fact = svc.ground("When was Grand Theft Auto V released?").await.unwrap();
        assert_eq!(fact.platform, "PS3");
        assert_eq!(fact.release_date_display, "09/17/2013");
        assert_eq!(fact.critic_score.as_deref(), Some("9.4"));

        let system = build_system_message(Some(&fact));
        assert!(system.starts_with(SYSTEM_PROMPT));
        assert!(system.ends_with(
            "When relevant, use this verified data: Grand Theft Auto V was released on \
             09/17/2013 for PS3. Genre: Action. Developer: Rockstar North. \
             Publisher: Rockstar Games. Critic score: 9.4. Also released on: PS4, XOne."
        ));
    }

    #[tokio::test]
    async fn unknown_title_or_shape_skips_grounding() {
        let svc = service();
        assert!(svc.ground("Who developed Celeste?").await.is_none());
        assert!(svc.ground("What is the best RPG?").await.is_none());
        assert_eq!(
            svc.ground("who developed hollow knight?").await.map(|f| f.developer),
            Some("Team Cherry".to_string())
        );
    }

    #[tokio::test]
    async fn answer_without_api_key_fails_before_calling_model() {
        let err = service().answer("Who developed Hollow Knight?").await.unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
