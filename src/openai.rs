use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// One non-streaming chat completion: a system message plus the user's question.
    pub async fn complete(
        &self,
        api_key: &str,
        model: &str,
        system: &str,
        question: &str,
        max_tokens: usize,
    ) -> Result<String> {
        #[derive(Serialize)]
        struct Message<'a> {
            role: &'a str,
            content: &'a str,
        }

        #[derive(Serialize)]
        struct CompletionReq<'a> {
            model: &'a str,
            messages: Vec<Message<'a>>,
            max_tokens: usize,
        }

        #[derive(Deserialize)]
        struct CompletionResp {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMessage,
        }

        #[derive(Deserialize)]
        struct ChoiceMessage {
            #[serde(default)]
            content: Option<String>,
        }

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(&CompletionReq {
                model,
                messages: vec![
                    Message {
                        role: "system",
                        content: system,
                    },
                    Message {
                        role: "user",
                        content: question.trim(),
                    },
                ],
                max_tokens,
            })
            .send()
            .await
            .context("failed to call chat completions endpoint")?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "chat completions returned {status}: {}",
                normalize_err_body(&body)
            );
        }

        let response = response
            .json::<CompletionResp>()
            .await
            .context("failed to decode chat completions response")?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        let answer = content.trim();
        if answer.is_empty() {
            anyhow::bail!("empty response from model");
        }
        Ok(answer.to_string())
    }
}

fn normalize_err_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    if let Ok(json) = serde_json::from_str::<serde_json::Value>(trimmed) {
        let error = json.get("error");
        if let Some(message) = error
            .and_then(|err| err.get("message"))
            .and_then(|v| v.as_str())
        {
            return message.to_string();
        }
        if let Some(message) = error.and_then(|v| v.as_str()) {
            return message.to_string();
        }
    }

    trimmed.to_string()
}
