//! Capture Scheduler
//!
//! Fills the sample window at a bounded cadence for a fixed duration after a
//! button edge. Polled from the control loop; there is no timer interrupt.

use serde::{Deserialize, Serialize};

use crate::constants::{CAPTURE_DURATION_MS, SAMPLE_INTERVAL_MS};
use crate::logic::model::SampleWindow;
use crate::logic::sensor::AccelerometerSource;

/// Sampling cadence and window length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureTiming {
    pub sample_interval_ms: u64,
    pub capture_duration_ms: u64,
}

impl Default for CaptureTiming {
    fn default() -> Self {
        Self {
            sample_interval_ms: SAMPLE_INTERVAL_MS,
            capture_duration_ms: CAPTURE_DURATION_MS,
        }
    }
}

/// An in-progress capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSession {
    pub started_at_ms: u64,
    pub last_sample_ms: u64,
    /// Samples read after the window was already full
    pub dropped_samples: usize,
    pub read_errors: usize,
}

/// Everything the capture path owns: the window and the optional session
#[derive(Debug, Clone, Default)]
pub struct CaptureState {
    window: SampleWindow,
    session: Option<CaptureSession>,
}

impl CaptureState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&CaptureSession> {
        self.session.as_ref()
    }

    /// Read-only view of the window
    pub fn window(&self) -> &SampleWindow {
        &self.window
    }
}

/// Summary handed out when a session ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptureSummary {
    pub samples_written: usize,
    pub elapsed_ms: u64,
    pub dropped_samples: usize,
    pub read_errors: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No session active
    Idle,
    /// Session still running
    Capturing,
    /// Session ended on this tick; the window is ready to read
    Completed(CaptureSummary),
}

#[derive(Debug, Clone, Default)]
pub struct CaptureScheduler {
    timing: CaptureTiming,
}

impl CaptureScheduler {
    pub fn new(timing: CaptureTiming) -> Self {
        Self { timing }
    }

    /// Start a session unless one is already running.
    ///
    /// Returns `true` when a new session was started.
    pub fn on_button_edge(&self, state: &mut CaptureState, now_ms: u64) -> bool {
        if state.session.is_some() {
            log::debug!("Button edge ignored, capture already in progress");
            return false;
        }

        state.window.reset();
        state.session = Some(CaptureSession {
            started_at_ms: now_ms,
            last_sample_ms: now_ms,
            dropped_samples: 0,
            read_errors: 0,
        });

        log::info!("Button pressed! Starting gesture capture...");
        true
    }

    /// Advance the active session, if any
    pub fn tick(
        &self,
        state: &mut CaptureState,
        now_ms: u64,
        sensor: &mut dyn AccelerometerSource,
    ) -> TickOutcome {
        let Some(session) = state.session.as_mut() else {
            return TickOutcome::Idle;
        };

        if now_ms.saturating_sub(session.last_sample_ms) >= self.timing.sample_interval_ms {
            session.last_sample_ms = now_ms;

            match sensor.read() {
                Ok(sample) => {
                    if !state.window.push(sample) {
                        session.dropped_samples += 1;
                    }
                }
                Err(e) => {
                    session.read_errors += 1;
                    log::warn!("Accelerometer read failed: {}", e);
                }
            }
        }

        let elapsed_ms = now_ms.saturating_sub(session.started_at_ms);
        if elapsed_ms < self.timing.capture_duration_ms {
            return TickOutcome::Capturing;
        }

        let summary = CaptureSummary {
            samples_written: state.window.samples_written(),
            elapsed_ms,
            dropped_samples: session.dropped_samples,
            read_errors: session.read_errors,
        };
        state.session = None;

        log::info!(
            "Capture complete: {} samples in {} ms ({:.0}% full)",
            summary.samples_written,
            summary.elapsed_ms,
            state.window.status().fill_percent
        );
        log::debug!("First feature value: {}", state.window.as_slice()[0]);

        TickOutcome::Completed(summary)
    }
}
