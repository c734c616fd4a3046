//! Result Reconciler
//!
//! Turns the authoritative (label, confidence) into one indicator update and
//! one log call. The log outcome never touches the indicator.

use super::indicator::{Indicator, IndicatorState};
use crate::logic::cloud::{GestureLogEntry, GestureLogger};
use crate::logic::error::GestureError;
use crate::logic::model::ClassificationResult;

/// What reconciliation did for one event
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub indicator: IndicatorState,
    pub log_error: Option<GestureError>,
}

impl Reconciliation {
    pub fn logged(&self) -> bool {
        self.log_error.is_none()
    }
}

pub struct ResultReconciler {
    logger: Box<dyn GestureLogger>,
    identifier: String,
}

impl ResultReconciler {
    pub fn new(logger: Box<dyn GestureLogger>, identifier: impl Into<String>) -> Self {
        Self {
            logger,
            identifier: identifier.into(),
        }
    }

    pub fn reconcile(
        &self,
        result: &ClassificationResult,
        indicator: &mut dyn Indicator,
    ) -> Reconciliation {
        let state = IndicatorState::for_label(&result.label);
        indicator.set(state);

        log::info!(
            "Gesture {} ({:.2}%, {}) -> LED {}",
            result.label,
            result.confidence,
            result.source.as_str(),
            state.name()
        );

        let entry = GestureLogEntry {
            identifier: self.identifier.clone(),
            gesture: result.label.clone(),
            confidence: result.confidence,
        };

        let log_error = match self.logger.log_gesture(&entry) {
            Ok(status) => {
                log::debug!("Gesture log accepted (HTTP {})", status);
                None
            }
            Err(e) => {
                log::warn!("Failed to send gesture log: {}", e);
                Some(GestureError::LoggingFailure(e.to_string()))
            }
        };

        Reconciliation { indicator: state, log_error }
    }
}
