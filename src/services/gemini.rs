// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gemini `generateContent` client.
//!
//! Handles:
//! - Plain-text and schema-constrained JSON completions
//! - Credential checks at call time (never read from the environment here)
//! - Normalizing rejected credentials to a single upstream error
//! - Client-side timeouts

use crate::config::Config;
use crate::error::AppError;
use crate::services::gateway::{CompletionRequest, CompletionService};
use crate::services::schema::Schema;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a client for `model`, with the credential passed in explicitly.
    pub fn new(
        api_key: Option<String>,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            model,
            api_key,
            timeout,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            config.gemini_base_url.clone(),
            config.request_timeout(),
        )
    }

    /// Send one prompt and return the concatenated candidate text.
    pub async fn generate_content(&self, request: &CompletionRequest) -> Result<String, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AppError::Configuration(AppError::API_KEY_MISSING.to_string()))?;

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateContentRequest::new(request);
        let started = Instant::now();

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let parsed: GenerateContentResponse = self.check_response_json(response).await?;

        tracing::debug!(
            model = %self.model,
            status = status.as_u16(),
            structured = request.schema.is_some(),
            latency_ms = started.elapsed().as_millis() as u64,
            "Gemini completion finished"
        );

        parsed
            .text()
            .ok_or_else(|| AppError::Decode("response contained no candidate text".to_string()))
    }

    /// Check response status and parse the JSON envelope.
    ///
    /// The body is read before parsing so that a stalled or dropped body is
    /// reported as an upstream failure rather than as malformed JSON.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(upstream_error(status.as_u16(), &String::from_utf8_lossy(&body)));
        }

        serde_json::from_slice(&body)
            .map_err(|e| AppError::Decode(format!("JSON parse error: {}", e)))
    }

    fn transport_error(&self, e: reqwest::Error) -> AppError {
        if e.is_timeout() {
            let secs = self.timeout.as_secs_f64();
            tracing::warn!(timeout_secs = secs, "Gemini request timed out");
            AppError::Upstream(format!("Request timed out after {} seconds", secs))
        } else {
            AppError::Upstream(e.to_string())
        }
    }
}

#[async_trait]
impl CompletionService for GeminiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AppError> {
        self.generate_content(request).await
    }
}

/// Map a non-success response to an upstream error.
///
/// A rejected key comes back as a 400 with "API key not valid"; it is
/// reported as "Requested entity was not found." so both spellings of a bad
/// credential look the same downstream.
fn upstream_error(status: u16, body: &str) -> AppError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.to_string());

    if message.contains("API key not valid") || status == 401 || status == 403 {
        tracing::warn!(status, "Gemini rejected the API key");
        return AppError::Upstream(AppError::ENTITY_NOT_FOUND.to_string());
    }

    if status == 429 {
        tracing::warn!("Gemini rate limit hit (429)");
        return AppError::Upstream("Rate limit exceeded, please try again shortly".to_string());
    }

    AppError::Upstream(format!("HTTP {}: {}", status, message))
}

// ─── Wire types ──────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(request: &'a CompletionRequest) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            generation_config: request.schema.as_ref().map(|schema| GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
        }
    }
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Schema,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, or `None` if it has none.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_plain_text() {
        let request = CompletionRequest::text("Plan a trip".to_string());
        let body = serde_json::to_value(GenerateContentRequest::new(&request)).unwrap();
        assert_eq!(
            body,
            json!({ "contents": [{ "role": "user", "parts": [{ "text": "Plan a trip" }] }] })
        );
    }

    #[test]
    fn test_request_body_declares_schema() {
        let request = CompletionRequest::structured(
            "How long?".to_string(),
            Schema::object().property("days", Schema::integer()),
        );
        let body = serde_json::to_value(GenerateContentRequest::new(&request)).unwrap();
        let config = &body["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["type"], "OBJECT");
        assert_eq!(config["responseSchema"]["required"], json!(["days"]));
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "[1," }, { "text": "2]" }] } }]
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({ "promptFeedback": {} })).unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_invalid_key_normalized() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
        let err = upstream_error(400, body);
        assert!(matches!(&err, AppError::Upstream(msg) if msg == AppError::ENTITY_NOT_FOUND));
        assert_eq!(err.user_message(), AppError::CHECK_API_KEY);
    }

    #[test]
    fn test_other_status_keeps_message() {
        let err = upstream_error(500, r#"{"error":{"message":"Internal error"}}"#);
        assert!(matches!(&err, AppError::Upstream(msg) if msg == "HTTP 500: Internal error"));
        assert!(!err.is_credential_error());
    }

    #[tokio::test]
    async fn test_missing_key_is_configuration_error() {
        let client = GeminiClient::new(
            None,
            "gemini-2.5-flash".to_string(),
            "http://127.0.0.1:9".to_string(),
            Duration::from_secs(1),
        )
        .unwrap();

        let err = client
            .generate_content(&CompletionRequest::text("hi".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
