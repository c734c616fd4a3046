//! Deployment configuration
//!
//! Settings that may differ between installs. Everything the capture and
//! decision logic depends on stays in `constants`.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote Classifier endpoint
    pub predict_url: String,
    /// Logging endpoint
    pub log_url: String,
    /// Identifier attached to every log entry
    pub device_id: String,
    /// ONNX model file
    pub model_path: String,
    /// Accelerometer replay file (host builds)
    pub replay_csv: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Hold time before the indicator is cleared after an event
    pub result_hold_ms: u64,
    /// Light the indicator white while capturing
    pub capture_feedback: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            predict_url: constants::DEFAULT_PREDICT_URL.to_string(),
            log_url: constants::DEFAULT_LOG_URL.to_string(),
            device_id: constants::DEFAULT_DEVICE_ID.to_string(),
            model_path: constants::DEFAULT_MODEL_PATH.to_string(),
            replay_csv: constants::DEFAULT_REPLAY_CSV.to_string(),
            request_timeout_secs: constants::DEFAULT_REQUEST_TIMEOUT,
            result_hold_ms: constants::DEFAULT_RESULT_HOLD_MS,
            capture_feedback: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            predict_url: constants::get_predict_url(),
            log_url: constants::get_log_url(),
            device_id: constants::get_device_id(),
            model_path: constants::get_model_path(),
            replay_csv: constants::get_replay_csv(),
            request_timeout_secs: constants::get_request_timeout(),
            result_hold_ms: constants::get_result_hold_ms(),
            capture_feedback: constants::is_capture_feedback_enabled(),
        }
    }
}
