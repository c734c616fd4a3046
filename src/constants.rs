//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Capture timing, threshold, feature size and the label set are fixed at
//! build time. Endpoints and device identity may be overridden from the
//! environment for deployment.

/// Minimum spacing between two accelerometer samples (ms)
pub const SAMPLE_INTERVAL_MS: u64 = 10;

/// Length of one capture window (ms)
pub const CAPTURE_DURATION_MS: u64 = 1000;

/// Local confidence (percent) at or above which the on-device result is trusted
pub const CONFIDENCE_THRESHOLD: f32 = 80.0;

/// Number of axes per accelerometer sample
pub const AXIS_COUNT: usize = 3;

/// Classifier input length (flattened xyz triples)
pub const FEATURE_SIZE: usize = 300;

/// Number of xyz triples that fit in one window
pub const WINDOW_SAMPLES: usize = FEATURE_SIZE / AXIS_COUNT;

/// Gesture labels in model output order
pub const LABELS: [&str; 3] = ["O", "V", "Z"];

/// Control loop polling period (us).
///
/// Must stay well under 1 ms: the scheduler works on whole milliseconds, so
/// a sample is only on time if the loop sees every millisecond tick.
pub const POLL_INTERVAL_US: u64 = 200;

/// Default Remote Classifier endpoint
pub const DEFAULT_PREDICT_URL: &str = "http://localhost:8000/predict";

/// Default logging endpoint
pub const DEFAULT_LOG_URL: &str = "http://localhost:8000/log";

/// Default device identifier sent with every log entry
pub const DEFAULT_DEVICE_ID: &str = "magic-wand-01";

/// Default on-device model location
pub const DEFAULT_MODEL_PATH: &str = "models/magic_wand.onnx";

/// Default replay file for the host accelerometer source
pub const DEFAULT_REPLAY_CSV: &str = "data/sample_gesture.csv";

/// Timeout for every outbound request (seconds)
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 10;

/// How long a result colour stays lit before the indicator is cleared (ms)
pub const DEFAULT_RESULT_HOLD_MS: u64 = 800;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Magic Wand";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get Remote Classifier URL from environment or use default
pub fn get_predict_url() -> String {
    std::env::var("GESTURE_PREDICT_URL")
        .unwrap_or_else(|_| DEFAULT_PREDICT_URL.to_string())
}

/// Get logging URL from environment or use default
pub fn get_log_url() -> String {
    std::env::var("GESTURE_LOG_URL")
        .unwrap_or_else(|_| DEFAULT_LOG_URL.to_string())
}

/// Get device identifier from environment or use default
pub fn get_device_id() -> String {
    std::env::var("GESTURE_DEVICE_ID")
        .unwrap_or_else(|_| DEFAULT_DEVICE_ID.to_string())
}

/// Get model path from environment or use default
pub fn get_model_path() -> String {
    std::env::var("GESTURE_MODEL_PATH")
        .unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string())
}

/// Get replay CSV path from environment or use default
pub fn get_replay_csv() -> String {
    std::env::var("GESTURE_REPLAY_CSV")
        .unwrap_or_else(|_| DEFAULT_REPLAY_CSV.to_string())
}

/// Get request timeout from environment or use default
pub fn get_request_timeout() -> u64 {
    std::env::var("GESTURE_REQUEST_TIMEOUT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT)
}

/// Get result hold time from environment or use default
pub fn get_result_hold_ms() -> u64 {
    std::env::var("GESTURE_RESULT_HOLD_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_RESULT_HOLD_MS)
}

/// Check if the white "capturing" colour is enabled
pub fn is_capture_feedback_enabled() -> bool {
    std::env::var("GESTURE_CAPTURE_FEEDBACK")
        .map(|s| s.to_lowercase() != "false" && s != "0")
        .unwrap_or(true)
}
