//! In-memory doubles for the hardware and network seams.
//!
//! Handles are `Clone` and share state, so a test keeps one copy to inspect
//! after boxing the other into the component under test.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use super::cloud::{CloudError, GestureLogEntry, GestureLogger, RemoteClassifier};
use super::control_loop::Clock;
use super::model::{ClassDistribution, ClassificationResult, InferenceError, LocalClassifier, SampleWindow};
use super::response::{Indicator, IndicatorState};
use super::sensor::{AccelSample, AccelerometerSource, SensorError};
use super::trigger::TriggerInput;
use crate::constants::LABELS;

pub fn labels() -> Vec<String> {
    LABELS.iter().map(|l| l.to_string()).collect()
}

/// Distribution over the default labels in O, V, Z order
pub fn distribution(values: [f32; 3]) -> ClassDistribution {
    ClassDistribution::new(&labels(), &values)
}

/// Returns x = read index so sample order is visible in the window
#[derive(Debug, Clone, Default)]
pub struct CountingSensor {
    reads: Arc<Mutex<usize>>,
}

impl CountingSensor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reads(&self) -> usize {
        *self.reads.lock()
    }
}

impl AccelerometerSource for CountingSensor {
    fn read(&mut self) -> Result<AccelSample, SensorError> {
        let mut reads = self.reads.lock();
        let sample = AccelSample::new(*reads as f32, 0.0, 0.0);
        *reads += 1;
        Ok(sample)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FailingSensor;

impl AccelerometerSource for FailingSensor {
    fn read(&mut self) -> Result<AccelSample, SensorError> {
        Err(SensorError::Read("i2c bus timeout".into()))
    }
}

#[derive(Clone)]
pub struct StubClassifier {
    outcome: Result<ClassDistribution, InferenceError>,
    seen: Arc<Mutex<Vec<Vec<f32>>>>,
}

impl StubClassifier {
    pub fn returning(values: [f32; 3]) -> Self {
        Self {
            outcome: Ok(distribution(values)),
            seen: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(InferenceError(message.to_string())),
            seen: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn windows(&self) -> Vec<Vec<f32>> {
        self.seen.lock().clone()
    }
}

impl LocalClassifier for StubClassifier {
    fn classify(&self, window: &SampleWindow) -> Result<ClassDistribution, InferenceError> {
        self.seen.lock().push(window.as_slice().to_vec());
        self.outcome.clone()
    }
}

#[derive(Clone)]
pub struct StubRemote {
    outcome: Result<ClassificationResult, CloudError>,
    seen: Arc<Mutex<Vec<Vec<f32>>>>,
}

impl StubRemote {
    pub fn returning(label: &str, confidence: f32) -> Self {
        Self {
            outcome: Ok(ClassificationResult::remote(label, confidence)),
            seen: Arc::default(),
        }
    }

    pub fn failing(error: CloudError) -> Self {
        Self {
            outcome: Err(error),
            seen: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn windows(&self) -> Vec<Vec<f32>> {
        self.seen.lock().clone()
    }
}

impl RemoteClassifier for StubRemote {
    fn classify_remote(&self, window: &SampleWindow) -> Result<ClassificationResult, CloudError> {
        self.seen.lock().push(window.as_slice().to_vec());
        self.outcome.clone()
    }
}

#[derive(Clone, Default)]
pub struct RecordingLogger {
    failure: Option<CloudError>,
    entries: Arc<Mutex<Vec<GestureLogEntry>>>,
    calls: Arc<Mutex<usize>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: CloudError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Entries that were accepted
    pub fn entries(&self) -> Vec<GestureLogEntry> {
        self.entries.lock().clone()
    }

    /// Attempts, including rejected ones
    pub fn calls(&self) -> usize {
        *self.calls.lock()
    }
}

impl GestureLogger for RecordingLogger {
    fn log_gesture(&self, entry: &GestureLogEntry) -> Result<u16, CloudError> {
        *self.calls.lock() += 1;
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => {
                self.entries.lock().push(entry.clone());
                Ok(200)
            }
        }
    }
}

#[derive(Clone, Default)]
pub struct RecordingIndicator {
    history: Arc<Mutex<Vec<IndicatorState>>>,
}

impl RecordingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<IndicatorState> {
        self.history.lock().clone()
    }
}

impl Indicator for RecordingIndicator {
    fn set(&mut self, state: IndicatorState) {
        self.history.lock().push(state);
    }
}

/// Time only moves when someone sleeps or calls `advance`.
///
/// Kept in microseconds and read back truncated to whole milliseconds, like
/// `MonotonicClock`. Short sleeps can overshoot by a cycling amount.
#[derive(Clone, Default)]
pub struct ManualClock {
    now_us: Arc<Mutex<u64>>,
    sleeps: Arc<Mutex<Vec<u64>>>,
    overshoot_us: Arc<Vec<u64>>,
    short_sleeps: Arc<Mutex<usize>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `sleep_us` runs late by the next value of `pattern`
    pub fn with_overshoot(pattern: Vec<u64>) -> Self {
        Self {
            overshoot_us: Arc::new(pattern),
            ..Self::default()
        }
    }

    pub fn advance(&self, ms: u64) {
        *self.now_us.lock() += ms * 1_000;
    }

    /// Millisecond sleeps, in call order
    pub fn sleeps(&self) -> Vec<u64> {
        self.sleeps.lock().clone()
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        *self.now_us.lock() / 1_000
    }

    fn sleep_ms(&self, ms: u64) {
        self.sleeps.lock().push(ms);
        *self.now_us.lock() += ms * 1_000;
    }

    fn sleep_us(&self, us: u64) {
        let mut count = self.short_sleeps.lock();
        let late = if self.overshoot_us.is_empty() {
            0
        } else {
            self.overshoot_us[*count % self.overshoot_us.len()]
        };
        *count += 1;
        *self.now_us.lock() += us + late;
    }
}

/// Button level per poll; released once the script runs out
#[derive(Clone, Default)]
pub struct ScriptedTrigger {
    levels: Arc<Mutex<VecDeque<bool>>>,
}

impl ScriptedTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one press: `held` polls down, then one poll up
    pub fn press(&self, held: usize) {
        let mut levels = self.levels.lock();
        levels.extend(std::iter::repeat(true).take(held));
        levels.push_back(false);
    }

    pub fn release_for(&self, polls: usize) {
        self.levels.lock().extend(std::iter::repeat(false).take(polls));
    }
}

impl TriggerInput for ScriptedTrigger {
    fn is_pressed(&mut self) -> bool {
        self.levels.lock().pop_front().unwrap_or(false)
    }
}
