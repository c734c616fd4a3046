//! Confidence Threshold - Offload decision
//!
//! The winning local confidence is compared against a fixed cutoff. At or
//! above it the on-device answer is final; below it the raw window goes to
//! the Remote Classifier and the local answer is only kept for logging.

use serde::{Deserialize, Serialize};

use super::inference::ClassDistribution;
use super::result::ClassificationResult;
use crate::constants::CONFIDENCE_THRESHOLD;
use crate::logic::error::GestureError;

/// Threshold Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Cutoff in percent (0 - 100)
    pub confidence_threshold: f32,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: CONFIDENCE_THRESHOLD,
        }
    }
}

/// Outcome of the local/remote decision
#[derive(Debug, Clone, PartialEq)]
pub enum OffloadDecision {
    /// Local result is authoritative
    AcceptLocal(ClassificationResult),
    /// Local result is provisional; defer to the Remote Classifier
    Offload { provisional: ClassificationResult },
}

impl ThresholdConfig {
    pub fn new(confidence_threshold: f32) -> Self {
        Self { confidence_threshold }
    }

    /// Convert the top probability to percent and pick a path
    pub fn decide(&self, distribution: &ClassDistribution) -> Result<OffloadDecision, GestureError> {
        let (_, top) = distribution.top().ok_or_else(|| {
            GestureError::ClassificationFailure("no label has nonzero confidence".to_string())
        })?;

        let local = ClassificationResult::local(top.label.clone(), top.value * 100.0);

        if local.confidence >= self.confidence_threshold {
            Ok(OffloadDecision::AcceptLocal(local))
        } else {
            Ok(OffloadDecision::Offload { provisional: local })
        }
    }
}
