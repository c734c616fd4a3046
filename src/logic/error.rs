//! Gesture event errors
//!
//! Every variant is terminal for the current gesture event only. The loop
//! reports it and goes back to Idle.

use serde::Serialize;
use thiserror::Error;

use super::cloud::CloudError;
use super::model::InferenceError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GestureError {
    #[error("not enough data for inference: {written} of {required} samples")]
    InsufficientSamples { written: usize, required: usize },

    #[error("classification failed: {0}")]
    ClassificationFailure(String),

    #[error("offload transport failed: {0}")]
    OffloadTransportFailure(String),

    #[error("offload response rejected: {0}")]
    OffloadParseFailure(String),

    #[error("gesture log not delivered: {0}")]
    LoggingFailure(String),
}

/// Coarse error category (stats, log tags)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    InsufficientSamples,
    ClassificationFailure,
    OffloadTransportFailure,
    OffloadParseFailure,
    LoggingFailure,
}

impl GestureError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GestureError::InsufficientSamples { .. } => ErrorKind::InsufficientSamples,
            GestureError::ClassificationFailure(_) => ErrorKind::ClassificationFailure,
            GestureError::OffloadTransportFailure(_) => ErrorKind::OffloadTransportFailure,
            GestureError::OffloadParseFailure(_) => ErrorKind::OffloadParseFailure,
            GestureError::LoggingFailure(_) => ErrorKind::LoggingFailure,
        }
    }

    /// Converts a failed offload into the matching event error
    pub fn from_offload(err: CloudError) -> Self {
        match err {
            CloudError::ParseError(msg) => GestureError::OffloadParseFailure(msg),
            other => GestureError::OffloadTransportFailure(other.to_string()),
        }
    }
}

impl From<InferenceError> for GestureError {
    fn from(err: InferenceError) -> Self {
        GestureError::ClassificationFailure(err.0)
    }
}
