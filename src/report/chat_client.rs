//! OpenAI-compatible chat-completion client (Groq by default)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::prompt::{build_work_order_prompt, caption, SYSTEM_PROMPT};
use super::{ReportError, ReportGenerator, ReportRequest};
use crate::config::ReportConfig;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Report generator backed by a hosted chat model
pub struct ChatCompletionGenerator {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
    temperature: f64,
    max_tokens: u32,
}

impl ChatCompletionGenerator {
    /// Build from config, reading the API key from `config.api_key_env`.
    ///
    /// A missing key is not an error here; each `generate` call reports it
    /// so the assessment itself still succeeds.
    pub fn from_config(config: &ReportConfig) -> Result<Self, ReportError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        Self::new(config, api_key)
    }

    pub fn new(config: &ReportConfig, api_key: Option<String>) -> Result<Self, ReportError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
            api_key_env: config.api_key_env.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl ReportGenerator for ChatCompletionGenerator {
    async fn generate(&self, request: &ReportRequest) -> Result<String, ReportError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ReportError::MissingApiKey(self.api_key_env.clone()))?;

        let user_prompt = build_work_order_prompt(request);
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: &user_prompt },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(model = %self.model, state = %request.state, "Requesting maintenance report");

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ReportError::Status { status, body });
        }

        let parsed: ChatResponse = resp.json().await?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(ReportError::EmptyResponse)?;

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
        Ok(format!("{}\n\n---\n{}", text.trim_end(), caption(&self.model, &timestamp)))
    }

    fn name(&self) -> &'static str {
        "chat"
    }
}
