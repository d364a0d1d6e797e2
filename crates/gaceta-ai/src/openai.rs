//! OpenAI-compatible chat-completions backend for the [`Analyst`] trait.

use std::time::Duration;

use async_trait::async_trait;
use gaceta_core::{ClassificationResult, Config, EnrichmentResult, RawNotice, StoredRecord};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{Analyst, ClassificationError, prompt};

/// Request timeout for a single backend call. A timeout surfaces as a
/// per-item [`ClassificationError`], never a hang.
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Analyst backed by an OpenAI-compatible `/chat/completions` endpoint.
///
/// Uses the cheap classification model for the relevance gate and the
/// summary model for enrichment and the weekly digest.
pub struct OpenAiAnalyst {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    classification_model: String,
    summary_model: String,
    industry_profile: String,
}

#[derive(serde::Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(serde::Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(serde::Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: String,
}

/// Wire shape of a relevance response. Score is validated on conversion.
#[derive(Deserialize)]
struct RelevanceWire {
    relevance_score: i64,
    reasoning: String,
}

/// Wire shape of an enrichment response.
#[derive(Deserialize)]
struct EnrichmentWire {
    summary: String,
    key_points: Vec<String>,
    title: String,
    category: String,
}

impl OpenAiAnalyst {
    pub fn from_config(config: &Config) -> Result<Self, ClassificationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            classification_model: config.classification_model.clone(),
            summary_model: config.summary_model.clone(),
            industry_profile: config.industry_profile.clone(),
        })
    }

    /// One chat-completions call; returns the assistant message content.
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
        json_output: bool,
    ) -> Result<String, ClassificationError> {
        let request = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.0,
            response_format: json_output.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        debug!(model, prompt_len = prompt.len(), "calling backend");
        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClassificationError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = resp.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ClassificationError::Schema("response had no choices".into()))
    }
}

#[async_trait]
impl Analyst for OpenAiAnalyst {
    async fn classify(
        &self,
        notice: &RawNotice,
    ) -> Result<ClassificationResult, ClassificationError> {
        let prompt = prompt::relevance(&self.industry_profile, notice);
        let content = self
            .complete(&self.classification_model, &prompt, true)
            .await?;
        let wire: RelevanceWire = parse_payload(&content)?;
        ClassificationResult::new(wire.relevance_score, wire.reasoning)
            .map_err(|e| ClassificationError::Schema(e.to_string()))
    }

    async fn summarize(
        &self,
        notice: &RawNotice,
    ) -> Result<EnrichmentResult, ClassificationError> {
        let prompt = prompt::enrichment(notice);
        let content = self.complete(&self.summary_model, &prompt, true).await?;
        let wire: EnrichmentWire = parse_payload(&content)?;
        Ok(EnrichmentResult {
            summary: wire.summary,
            key_points: wire.key_points,
            generated_title: wire.title,
            category: wire.category,
        })
    }

    async fn digest(
        &self,
        records: &[StoredRecord],
        period_label: &str,
    ) -> Result<String, ClassificationError> {
        let prompt = prompt::digest(records, period_label, records.len());
        let html = self.complete(&self.summary_model, &prompt, false).await?;
        if html.trim().is_empty() {
            return Err(ClassificationError::Schema("empty digest response".into()));
        }
        Ok(html)
    }
}

/// Parse a structured JSON payload out of assistant message content.
///
/// Tolerates a fenced ```json block around the object; anything else that
/// fails to parse is a schema violation.
fn parse_payload<T: DeserializeOwned>(content: &str) -> Result<T, ClassificationError> {
    let trimmed = content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();
    serde_json::from_str(trimmed).map_err(|e| ClassificationError::Schema(e.to_string()))
}
