use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error, warn};

use super::api_error::{extract_api_error, is_credential_rejection};
use super::result::{Failure, GenerationResult};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const BASE_URL_ENV: &str = "GEMINI_BASE_URL";
const TEMPERATURE: f64 = 0.3;
const TOP_P: f64 = 0.95;

#[derive(Debug, Clone)]
pub struct GeminiClient {
    base_url: String,
    model: String,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(base_url, timeout)
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .with_context(|| "failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.into(),
            model: DEFAULT_MODEL.to_string(),
            http,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Makes a single attempt; every failure is classified, never returned as `Err`.
    pub async fn generate(&self, prompt: &str, credentials: &str) -> GenerationResult {
        let api_key = credentials.trim();
        if api_key.is_empty() {
            warn!("Gemini API key is missing; skipping request");
            return Failure::missing_credentials().into();
        }
        match self.call(prompt, api_key).await {
            Ok(text) => GenerationResult::Success { text },
            Err(failure) => failure.into(),
        }
    }

    async fn call(&self, prompt: &str, api_key: &str) -> Result<String, Failure> {
        let url = self.endpoint(api_key).map_err(|err| {
            error!(error = %err, "invalid Gemini endpoint");
            Failure::generation_failed()
        })?;

        let body = json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [
                        {"text": prompt}
                    ]
                }
            ],
            "generationConfig": {
                "temperature": TEMPERATURE,
                "topP": TOP_P
            }
        });

        debug!(model = %self.model, prompt_len = prompt.len(), "calling Gemini");
        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err.without_url(), "Gemini request failed");
                Failure::generation_failed()
            })?;
        let status = response.status();
        let payload = response.text().await.map_err(|err| {
            warn!(status = %status, error = %err.without_url(), "failed to read Gemini response");
            Failure::generation_failed()
        })?;

        if !status.is_success() {
            let detail = extract_api_error(&payload);
            warn!(
                status = %status,
                api_status = detail.status.as_deref().unwrap_or("unknown"),
                detail = %detail.message,
                "Gemini API error"
            );
            if is_credential_rejection(status, &detail) {
                return Err(Failure::invalid_credentials());
            }
            return Err(Failure::generation_failed());
        }

        extract_text(&payload)
    }

    fn endpoint(&self, api_key: &str) -> Result<reqwest::Url> {
        let model_path = if self.model.starts_with("models/") {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        };
        let endpoint = format!(
            "{}/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model_path
        );
        let mut url = reqwest::Url::parse(&endpoint)
            .with_context(|| format!("failed to parse Gemini endpoint URL: {endpoint}"))?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }
}

fn extract_text(payload: &str) -> Result<String, Failure> {
    let parsed: GeminiResponse = serde_json::from_str(payload).map_err(|err| {
        warn!(error = %err, "failed to parse Gemini response JSON");
        Failure::generation_failed()
    })?;

    let candidate = parsed.candidates.into_iter().next();
    let finish_reason = candidate
        .as_ref()
        .and_then(|candidate| candidate.finish_reason.clone());
    let text = candidate
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        warn!(
            finish_reason = finish_reason.as_deref().unwrap_or("none"),
            "Gemini returned no text candidate"
        );
        return Err(Failure::generation_failed());
    }
    Ok(text)
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}
