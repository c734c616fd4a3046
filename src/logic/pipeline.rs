//! Classification Pipeline
//!
//! Runs once per finished capture: local inference, the threshold decision,
//! an optional blocking offload, then reconciliation. Any failure ends the
//! event without actuation.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::cloud::RemoteClassifier;
use super::error::{ErrorKind, GestureError};
use super::model::{ClassificationResult, LocalClassifier, OffloadDecision, SampleWindow, ThresholdConfig};
use super::response::{Indicator, Reconciliation, ResultReconciler};
use crate::constants::WINDOW_SAMPLES;

/// Whole-system state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SystemPhase {
    Idle,
    Capturing,
    Classifying,
    ReconcilingLocal,
    Offloading,
    ReconcilingRemote,
}

/// Result of one successful gesture event
#[derive(Debug, Clone)]
pub struct EventReport {
    pub event_id: Uuid,
    /// Top local result (authoritative when not offloaded)
    pub local: ClassificationResult,
    pub offloaded: bool,
    /// Result that drove the indicator and the log
    pub result: ClassificationResult,
    pub reconciliation: Reconciliation,
    pub completed_at: DateTime<Utc>,
}

/// Counters across all events
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineStats {
    pub events: u64,
    pub local_accepted: u64,
    pub offloaded: u64,
    pub remote_accepted: u64,
    pub insufficient_samples: u64,
    pub classification_failures: u64,
    pub transport_failures: u64,
    pub parse_failures: u64,
    pub logging_failures: u64,
}

impl PipelineStats {
    fn record_error(&mut self, kind: ErrorKind) {
        match kind {
            ErrorKind::InsufficientSamples => self.insufficient_samples += 1,
            ErrorKind::ClassificationFailure => self.classification_failures += 1,
            ErrorKind::OffloadTransportFailure => self.transport_failures += 1,
            ErrorKind::OffloadParseFailure => self.parse_failures += 1,
            ErrorKind::LoggingFailure => self.logging_failures += 1,
        }
    }
}

pub struct GesturePipeline {
    classifier: Box<dyn LocalClassifier>,
    remote: Box<dyn RemoteClassifier>,
    reconciler: ResultReconciler,
    threshold: ThresholdConfig,
    stats: PipelineStats,
}

impl GesturePipeline {
    pub fn new(
        classifier: Box<dyn LocalClassifier>,
        remote: Box<dyn RemoteClassifier>,
        reconciler: ResultReconciler,
        threshold: ThresholdConfig,
    ) -> Self {
        Self {
            classifier,
            remote,
            reconciler,
            threshold,
            stats: PipelineStats::default(),
        }
    }

    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    /// Run one gesture event on a finished window
    pub fn process(
        &mut self,
        window: &SampleWindow,
        indicator: &mut dyn Indicator,
    ) -> Result<EventReport, GestureError> {
        let event_id = Uuid::new_v4();
        self.stats.events += 1;

        let outcome = self.run_event(event_id, window, indicator);
        match &outcome {
            Ok(report) => {
                if let Some(err) = &report.reconciliation.log_error {
                    self.stats.record_error(err.kind());
                }
            }
            Err(err) => {
                self.stats.record_error(err.kind());
                log::warn!("[{}] Gesture event failed: {}", event_id, err);
            }
        }
        log::debug!("[{}] phase {:?}", event_id, SystemPhase::Idle);

        outcome
    }

    fn run_event(
        &mut self,
        event_id: Uuid,
        window: &SampleWindow,
        indicator: &mut dyn Indicator,
    ) -> Result<EventReport, GestureError> {
        if !window.has_full_frame() {
            return Err(GestureError::InsufficientSamples {
                written: window.samples_written(),
                required: WINDOW_SAMPLES,
            });
        }

        log::debug!("[{}] phase {:?}", event_id, SystemPhase::Classifying);
        let distribution = self.classifier.classify(window)?;
        let decision = self.threshold.decide(&distribution)?;

        let (local, offloaded, result) = match decision {
            OffloadDecision::AcceptLocal(local) => {
                log::info!("[{}] Prediction: {} ({:.2}%)", event_id, local.label, local.confidence);
                self.stats.local_accepted += 1;
                log::debug!("[{}] phase {:?}", event_id, SystemPhase::ReconcilingLocal);
                (local.clone(), false, local)
            }
            OffloadDecision::Offload { provisional } => {
                log::info!(
                    "[{}] Prediction: {} ({:.2}%) - low confidence, sending raw data to server...",
                    event_id,
                    provisional.label,
                    provisional.confidence
                );
                self.stats.offloaded += 1;
                log::debug!("[{}] phase {:?}", event_id, SystemPhase::Offloading);

                let remote = self.remote
                    .classify_remote(window)
                    .map_err(GestureError::from_offload)?;

                log::info!(
                    "[{}] Server inference result: {} ({:.2}%)",
                    event_id,
                    remote.label,
                    remote.confidence
                );
                self.stats.remote_accepted += 1;
                log::debug!("[{}] phase {:?}", event_id, SystemPhase::ReconcilingRemote);
                (provisional, true, remote)
            }
        };

        let reconciliation = self.reconciler.reconcile(&result, indicator);

        Ok(EventReport {
            event_id,
            local,
            offloaded,
            result,
            reconciliation,
            completed_at: Utc::now(),
        })
    }
}
