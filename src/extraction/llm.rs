//! Prompted extraction via an Ollama-style chat endpoint

use crate::config::LlmConfig;
use crate::extraction::prompts::PromptTemplates;
use crate::extraction::{ExtractionOutcome, Extractor};
use crate::processing::record::RawFields;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f32,
    num_predict: usize,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

pub struct PromptedExtractor {
    client: reqwest::Client,
    config: LlmConfig,
    templates: PromptTemplates,
}

impl PromptedExtractor {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            templates: PromptTemplates::default(),
        }
    }

    /// Check whether the configured endpoint is reachable and serves the
    /// configured model. Non-fatal; callers only log the result.
    pub async fn probe(&self) -> bool {
        let url = self.config.endpoint.replace("/api/chat", "/api/tags");
        match timeout(Duration::from_secs(5), self.client.get(&url).send()).await {
            Ok(Ok(response)) if response.status().is_success() => match response.text().await {
                Ok(body) => body.contains(&self.config.model),
                Err(_) => false,
            },
            _ => false,
        }
    }

    async fn chat(&self, prompt: &str) -> Result<String, String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: self.templates.system.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            stream: false,
            options: ChatOptions {
                temperature: self.config.temperature,
                num_predict: self.config.num_predict,
            },
        };

        let send = self.client.post(&self.config.endpoint).json(&request).send();
        let response = match timeout(Duration::from_secs(self.config.timeout_secs), send).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return Err(format!("chat request failed: {}", e)),
            Err(_) => {
                return Err(format!(
                    "chat request timed out after {}s",
                    self.config.timeout_secs
                ))
            }
        };

        if !response.status().is_success() {
            return Err(format!("chat endpoint returned {}", response.status()));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| format!("malformed chat response: {}", e))?;

        Ok(parsed.message.content)
    }
}

impl Extractor for PromptedExtractor {
    async fn extract(&self, text: &str) -> ExtractionOutcome {
        let truncated = truncate_chars(text, self.config.prompt_budget);
        let prompt = self.templates.render_extraction(truncated);
        debug!("Prompt length: {} characters", prompt.len());

        // Transport failures get a bounded number of retries; a reply that
        // arrived but does not parse is not retried.
        let mut last_error = String::new();
        for attempt in 0..=self.config.max_retries {
            match self.chat(&prompt).await {
                Ok(reply) => {
                    return match parse_reply(&reply) {
                        Ok(raw) => ExtractionOutcome::Success(raw),
                        Err(reason) => ExtractionOutcome::failure(reason),
                    };
                }
                Err(e) => {
                    warn!("LLM call attempt {} failed: {}", attempt + 1, e);
                    last_error = e;
                }
            }
        }

        ExtractionOutcome::failure(format!("LLM processing failed: {}", last_error))
    }
}

/// Truncate to the first `max` characters without splitting a code point
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Recover a JSON payload from a free-form model reply: first try the
/// outermost brace-delimited span, then the whole reply with Markdown
/// code fences stripped.
fn parse_reply(reply: &str) -> Result<RawFields, String> {
    let candidate = match (reply.find('{'), reply.rfind('}')) {
        (Some(start), Some(end)) if start < end => Some(&reply[start..=end]),
        _ => None,
    };

    let value: serde_json::Value = match candidate
        .and_then(|span| serde_json::from_str(span).ok())
    {
        Some(value) => value,
        None => {
            let unfenced = reply.replace("```json", "").replace("```", "");
            serde_json::from_str(unfenced.trim())
                .map_err(|_| "No valid JSON found in LLM response".to_string())?
        }
    };

    if let Some(reason) = value.get("error").and_then(|v| v.as_str()) {
        return Err(format!("model reported an error: {}", reason));
    }

    serde_json::from_value(value).map_err(|e| format!("unexpected reply shape: {}", e))
}
