use crate::{
    config::GeminiConfig,
    error::{PromptError, Result},
    prompt::AssembledRequest,
};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use super::PromptGenerator;

/// Client for the `generateContent` endpoint. One outbound call per
/// invocation; failures are never retried here.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
    api_key: String,
}

impl GeminiClient {
    /// Fails with a configuration error when no credential is available,
    /// before any request can be made.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();
        Ok(Self {
            http: reqwest::Client::new(),
            config,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base(),
            self.config.model_id()
        )
    }

    pub async fn generate(&self, request: &AssembledRequest) -> Result<String> {
        let payload = build_request_body(request, self.config.temperature());
        let request_json = serde_json::to_string(&payload)
            .map_err(|e| PromptError::Serialization(e.to_string()))?;

        log::info!(
            "Invoking model: {} ({} image part(s))",
            self.config.model_id(),
            request.payloads.len()
        );
        log::debug!("Generation request payload: {} bytes", request_json.len());

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .header("content-type", "application/json")
            .body(request_json)
            .send()
            .await
            .map_err(|e| {
                log::error!("Generation transport error: {}", e);
                PromptError::Service(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PromptError::Response(e.to_string()))?;

        if !status.is_success() {
            let message = api_error_message(status, &body);
            log::error!("Generation request rejected: {}", message);
            return Err(PromptError::Service(message));
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| PromptError::Response(e.to_string()))?;
        let text = extract_text(parsed)?;
        log::info!("Generated {} characters", text.chars().count());
        Ok(text)
    }
}

#[async_trait]
impl PromptGenerator for GeminiClient {
    async fn generate(&self, request: &AssembledRequest) -> Result<String> {
        GeminiClient::generate(self, request).await
    }
}

/// Ordered inline image parts followed by the trailing instruction text, as
/// one user turn.
fn build_request_body(request: &AssembledRequest, temperature: f64) -> serde_json::Value {
    let mut parts: Vec<serde_json::Value> = request
        .payloads
        .iter()
        .map(|payload| {
            json!({
                "inlineData": {
                    "mimeType": payload.mime_type,
                    "data": BASE64.encode(&payload.data),
                }
            })
        })
        .collect();
    parts.push(json!({ "text": request.instruction }));

    json!({
        "systemInstruction": {
            "parts": [ { "text": request.system_instruction } ]
        },
        "contents": [ { "role": "user", "parts": parts } ],
        "generationConfig": { "temperature": temperature }
    })
}

/// A successful status with no non-empty text is a service failure, not a
/// result.
fn extract_text(response: GenerateContentResponse) -> Result<String> {
    let text = response
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(PromptError::EmptyResponse);
    }
    Ok(text.to_string())
}

fn api_error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => {
            let snippet: String = body.chars().take(200).collect();
            format!("HTTP {}: {}", status, snippet)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
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
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}
