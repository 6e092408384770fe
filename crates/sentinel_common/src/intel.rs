//! Intel - Outbound relay to the generative intelligence core
//!
//! One request per submission, no retry, no streaming. The relay is treated
//! as opaque: every failure class collapses into the single fixed relay
//! message at the call site, and an empty candidate becomes the fixed
//! no-response message. API keys come from the environment, never from disk.

use crate::config::IntelConfig;
use serde_json::Value;
use std::env;
use tracing::{debug, warn};
use uuid::Uuid;

/// Persona and ground rules sent as the system instruction
pub const SYSTEM_INSTRUCTION: &str = "\
You are the \"Quantum-Super Cyber Intelligence AI\", a highly advanced security assistant.
Your expertise includes:
1. Threat vector analysis.
2. Quantum-encryption vulnerability detection.
3. Network intrusion forensics.
4. Strategic cyber-defense recommendations.

Always respond in a technical, crisp, and authoritative tone typical of high-end sci-fi terminals.
Use markdown for structure.
If asked about system status, assume you are monitoring a massive quantum compute grid.
Keep responses concise but information-dense.";

/// Shown in the transcript when the relay fails for any reason
pub const RELAY_FAILURE_MESSAGE: &str =
    "COMMUNICATION RELAY ERROR: UNABLE TO ACCESS INTELLIGENCE MODULE.";

/// Shown when the relay answers with no usable candidate text
pub const EMPTY_RESPONSE_MESSAGE: &str = "NO RESPONSE FROM CORE INTELLIGENCE";

/// Relay errors
///
/// Callers do not distinguish these: the transcript shows the fixed relay
/// message either way. The variants exist for the log file.
#[derive(Debug, thiserror::Error)]
pub enum IntelError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Unexpected response shape: {0}")]
    Unexpected(String),
}

/// Relay client for `generateContent`-style endpoints
#[derive(Debug, Clone)]
pub struct IntelClient {
    base_url: String,
    model: String,
    api_key: String,
    temperature: f64,
    top_p: f64,
    http: reqwest::Client,
}

impl IntelClient {
    /// Build a client, resolving the API key from the configured env var
    pub fn from_config(config: &IntelConfig) -> Result<Self, IntelError> {
        let api_key = match env::var(&config.api_key_env) {
            Ok(key) if !key.is_empty() => key,
            Ok(_) => {
                return Err(IntelError::Config(format!(
                    "API key env var {} is empty",
                    config.api_key_env
                )))
            }
            Err(_) => {
                return Err(IntelError::Config(format!(
                    "API key env var {} not found",
                    config.api_key_env
                )))
            }
        };

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            temperature: config.temperature,
            top_p: config.top_p,
            http: reqwest::Client::new(),
        })
    }

    /// Send one prompt and return the candidate text
    ///
    /// Awaited without a deadline of our own; the single outstanding request
    /// is the caller's concurrency limit. Success passes the text through
    /// unmodified; an empty candidate becomes `EMPTY_RESPONSE_MESSAGE`.
    pub async fn generate(&self, prompt: &str) -> Result<String, IntelError> {
        let request_id = Uuid::new_v4();
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        debug!(%request_id, model = %self.model, "intel request dispatched");

        let body = request_body(prompt, self.temperature, self.top_p);
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| IntelError::Http(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(%request_id, %status, "intel request rejected");
            return Err(IntelError::Http(format!("HTTP {}: {}", status, text)));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| IntelError::Unexpected(format!("Failed to parse response: {}", e)))?;

        debug!(%request_id, "intel response received");
        Ok(extract_text(&json).unwrap_or_else(|| EMPTY_RESPONSE_MESSAGE.to_string()))
    }
}

/// Build the `generateContent` request body
pub fn request_body(prompt: &str, temperature: f64, top_p: f64) -> Value {
    serde_json::json!({
        "system_instruction": {
            "parts": [{ "text": SYSTEM_INSTRUCTION }]
        },
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt }]
        }],
        "generationConfig": {
            "temperature": temperature,
            "topP": top_p
        }
    })
}

/// Pull the first candidate's text out of a `generateContent` response
///
/// Returns None for a missing or empty candidate.
pub fn extract_text(response: &Value) -> Option<String> {
    let text = response["candidates"][0]["content"]["parts"][0]["text"].as_str()?;
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
