use std::{collections::BTreeMap, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use rigbench_types::{
    analysis::AnalysisRecord, config::AdvisorConfig, hardware::HardwareSpec, RigbenchError,
    Result,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, error};

use crate::{
    analysis_error, lookup_error, prompts, schema, translation_error, Analyzer, SpecLookup,
    Translator,
};

const INVALID_KEY_MARKER: &str = "API key not valid";

/// Why a single generateContent call did not produce usable JSON.
#[derive(Debug, Error)]
enum GenerateFailure {
    #[error("API key rejected")]
    InvalidKey,
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Gemini `generateContent` client with JSON-schema constrained output.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &AdvisorConfig) -> Result<Self> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            RigbenchError::Configuration(format!(
                "no API key configured; set advisor.api_key or the {} environment variable",
                config.api_key_env
            ))
        })?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| {
                RigbenchError::Configuration(format!("failed to build HTTP client: {err}"))
            })?;
        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    async fn generate(
        &self,
        prompt: &str,
        response_schema: Value,
    ) -> std::result::Result<String, GenerateFailure> {
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema,
            },
        });

        debug!("POST {} ({} prompt bytes)", self.url(), prompt.len());
        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| GenerateFailure::Transport(err.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| GenerateFailure::Transport(err.to_string()))?;

        if !status.is_success() {
            if text.contains(INVALID_KEY_MARKER) {
                return Err(GenerateFailure::InvalidKey);
            }
            return Err(GenerateFailure::Transport(format!("HTTP {status}: {text}")));
        }

        let envelope: Value = serde_json::from_str(&text)
            .map_err(|err| GenerateFailure::Malformed(format!("response envelope: {err}")))?;
        extract_text(&envelope)
            .ok_or_else(|| GenerateFailure::Malformed("response carried no candidate text".into()))
    }
}

/// Concatenated text parts of the first candidate.
fn extract_text(envelope: &Value) -> Option<String> {
    let parts = envelope
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Models occasionally answer with prose; only a JSON object is accepted.
fn parse_object<T: DeserializeOwned>(text: &str) -> std::result::Result<T, GenerateFailure> {
    let trimmed = text.trim();
    if !trimmed.starts_with('{') {
        return Err(GenerateFailure::Malformed(
            "received a non-JSON response from the model".into(),
        ));
    }
    serde_json::from_str(trimmed).map_err(|err| GenerateFailure::Malformed(err.to_string()))
}

#[async_trait]
impl SpecLookup for GeminiClient {
    async fn resolve(&self, device: &str, language: &str) -> Result<HardwareSpec> {
        let prompt = prompts::device_specs(device, language);
        let outcome = self
            .generate(&prompt, schema::device_specs())
            .await
            .and_then(|text| parse_object::<HardwareSpec>(&text));
        outcome.map_err(|failure| {
            error!("Error fetching device specs for {device:?}: {failure}");
            lookup_error(device)
        })
    }
}

#[async_trait]
impl Analyzer for GeminiClient {
    async fn analyze(
        &self,
        spec: &HardwareSpec,
        game: &str,
        language: &str,
    ) -> Result<AnalysisRecord> {
        let prompt = prompts::fps_analysis(spec, game, language);
        let outcome = self
            .generate(&prompt, schema::fps_analysis())
            .await
            .and_then(|text| parse_object::<AnalysisRecord>(&text));
        outcome.map_err(|failure| {
            error!("Error analyzing {game:?} on {}: {failure}", spec.cpu);
            match failure {
                GenerateFailure::InvalidKey => analysis_error(
                    "The Gemini API key is invalid or not configured correctly.",
                ),
                _ => analysis_error(
                    "Failed to get analysis from the AI. The model may be busy or the request could not be processed.",
                ),
            }
        })
    }
}

#[async_trait]
impl Translator for GeminiClient {
    async fn translate(
        &self,
        base: &BTreeMap<String, String>,
        target_language: &str,
    ) -> Result<BTreeMap<String, String>> {
        let prompt = prompts::translation(base, target_language);
        let outcome = self
            .generate(&prompt, schema::translation(base))
            .await
            .and_then(|text| parse_object::<BTreeMap<String, String>>(&text));
        outcome.map_err(|failure| {
            error!("Error translating UI to {target_language}: {failure}");
            translation_error(target_language)
        })
    }
}
