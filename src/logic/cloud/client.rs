//! Cloud API Client
//!
//! Blocking HTTP client for the remote gesture service: raw-window
//! prediction (offload) and gesture logging. Each call is a single attempt
//! bounded by the configured timeout.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logic::model::{ClassificationResult, SampleWindow};

/// Cloud server configuration
#[derive(Debug, Clone)]
pub struct CloudConfig {
    pub predict_url: String,
    pub log_url: String,
    pub timeout_seconds: u64,
}

impl Default for CloudConfig {
    fn default() -> Self {
        use crate::constants;

        Self {
            predict_url: constants::get_predict_url(),
            log_url: constants::get_log_url(),
            timeout_seconds: constants::get_request_timeout(),
        }
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
pub struct PredictRequest<'a> {
    pub data: &'a [f32],
}

#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    pub gesture: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureLogEntry {
    #[serde(rename = "student_id")]
    pub identifier: String,
    pub gesture: String,
    pub confidence: f32,
}

/// Cloud client errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CloudError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Server error: {0}")]
    ServerError(u16),

    #[error("Parse error: {0}")]
    ParseError(String),
}

// ============================================================================
// CAPABILITIES
// ============================================================================

/// Remote inference on the raw window
pub trait RemoteClassifier {
    fn classify_remote(&self, window: &SampleWindow) -> Result<ClassificationResult, CloudError>;
}

/// Fire-and-forget gesture log; returns the HTTP status on success
pub trait GestureLogger {
    fn log_gesture(&self, entry: &GestureLogEntry) -> Result<u16, CloudError>;
}

// ============================================================================
// HTTP CLIENT
// ============================================================================

pub struct CloudClient {
    config: CloudConfig,
    agent: ureq::Agent,
}

impl CloudClient {
    pub fn new(config: CloudConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build();

        Self { config, agent }
    }

    /// Client with a sub-second timeout (tests)
    pub fn with_timeout(config: CloudConfig, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { config, agent }
    }

    /// POST a JSON body and return (status, body)
    fn post_json(&self, url: &str, payload: &str) -> Result<(u16, String), CloudError> {
        let response = self.agent
            .post(url)
            .set("Content-Type", "application/json")
            .send_string(payload);

        match response {
            Ok(resp) => {
                let status = resp.status();
                let body = resp.into_string()
                    .map_err(|e| CloudError::NetworkError(e.to_string()))?;
                Ok((status, body))
            }
            Err(ureq::Error::Status(code, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                log::debug!("{} answered {}: {}", url, code, body);
                Err(CloudError::ServerError(code))
            }
            Err(e) => Err(CloudError::NetworkError(e.to_string())),
        }
    }
}

/// Decode a prediction body into an authoritative remote result
pub fn parse_predict_response(body: &str) -> Result<ClassificationResult, CloudError> {
    let parsed: PredictResponse = serde_json::from_str(body)
        .map_err(|e| CloudError::ParseError(e.to_string()))?;

    if !parsed.confidence.is_finite() || !(0.0..=100.0).contains(&parsed.confidence) {
        return Err(CloudError::ParseError(format!(
            "confidence {} outside 0-100",
            parsed.confidence
        )));
    }

    Ok(ClassificationResult::remote(parsed.gesture, parsed.confidence))
}

impl RemoteClassifier for CloudClient {
    fn classify_remote(&self, window: &SampleWindow) -> Result<ClassificationResult, CloudError> {
        let payload = serde_json::to_string(&PredictRequest { data: window.as_slice() })
            .map_err(|e| CloudError::ParseError(e.to_string()))?;

        log::info!("Sending raw data to server: {}", self.config.predict_url);
        log::debug!("Predict payload: {} floats", window.as_slice().len());

        let (status, body) = self.post_json(&self.config.predict_url, &payload)?;
        log::debug!("Server response ({}): {}", status, body);

        parse_predict_response(&body)
    }
}

impl GestureLogger for CloudClient {
    fn log_gesture(&self, entry: &GestureLogEntry) -> Result<u16, CloudError> {
        let payload = serde_json::to_string(entry)
            .map_err(|e| CloudError::ParseError(e.to_string()))?;

        log::debug!("Sending prediction to {}: {}", self.config.log_url, payload);

        let (status, body) = self.post_json(&self.config.log_url, &payload)?;
        log::debug!("Log endpoint response ({}): {}", status, body);
        Ok(status)
    }
}
