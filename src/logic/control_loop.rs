//! Control Loop
//!
//! Single-threaded poll loop: read the trigger, advance the capture, and run
//! the pipeline inline when a capture ends. Nothing else progresses while the
//! pipeline (including an offload request) is blocking.

use std::time::{Duration, Instant};

use super::capture::{CaptureScheduler, CaptureState, TickOutcome};
use super::error::GestureError;
use super::pipeline::{EventReport, GesturePipeline, SystemPhase};
use super::response::{Indicator, IndicatorState};
use super::sensor::AccelerometerSource;
use super::trigger::{EdgeDetector, TriggerInput};
use crate::constants::POLL_INTERVAL_US;

/// Millisecond time source
pub trait Clock {
    fn now_ms(&self) -> u64;
    fn sleep_ms(&self, ms: u64);
    /// Short pause between polls
    fn sleep_us(&self, us: u64);
}

pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn sleep_ms(&self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }

    fn sleep_us(&self, us: u64) {
        std::thread::sleep(Duration::from_micros(us));
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LoopSettings {
    /// Light the indicator white while capturing
    pub capture_feedback: bool,
    /// Hold before clearing the indicator after an event
    pub result_hold_ms: u64,
    pub poll_interval_us: u64,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            capture_feedback: true,
            result_hold_ms: crate::constants::DEFAULT_RESULT_HOLD_MS,
            poll_interval_us: POLL_INTERVAL_US,
        }
    }
}

pub struct ControlLoop {
    scheduler: CaptureScheduler,
    state: CaptureState,
    edge: EdgeDetector,
    pipeline: GesturePipeline,
    sensor: Box<dyn AccelerometerSource>,
    trigger: Box<dyn TriggerInput>,
    indicator: Box<dyn Indicator>,
    clock: Box<dyn Clock>,
    settings: LoopSettings,
    // indicator was set during the current event and needs clearing
    indicator_driven: bool,
}

impl ControlLoop {
    pub fn new(
        scheduler: CaptureScheduler,
        pipeline: GesturePipeline,
        sensor: Box<dyn AccelerometerSource>,
        trigger: Box<dyn TriggerInput>,
        indicator: Box<dyn Indicator>,
        clock: Box<dyn Clock>,
        settings: LoopSettings,
    ) -> Self {
        Self {
            scheduler,
            state: CaptureState::new(),
            edge: EdgeDetector::new(),
            pipeline,
            sensor,
            trigger,
            indicator,
            clock,
            settings,
            indicator_driven: false,
        }
    }

    pub fn phase(&self) -> SystemPhase {
        if self.state.is_active() {
            SystemPhase::Capturing
        } else {
            SystemPhase::Idle
        }
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    pub fn pipeline(&self) -> &GesturePipeline {
        &self.pipeline
    }

    /// One loop iteration. Returns the event outcome when a capture ended.
    pub fn poll_once(&mut self) -> Option<Result<EventReport, GestureError>> {
        let now = self.clock.now_ms();

        let pressed = self.trigger.is_pressed();
        if self.edge.update(pressed) && self.scheduler.on_button_edge(&mut self.state, now) {
            if self.settings.capture_feedback {
                self.indicator.set(IndicatorState::WHITE);
                self.indicator_driven = true;
            }
        }

        match self.scheduler.tick(&mut self.state, now, self.sensor.as_mut()) {
            TickOutcome::Completed(_) => {
                let outcome = self.pipeline.process(self.state.window(), self.indicator.as_mut());
                if outcome.is_ok() {
                    self.indicator_driven = true;
                }
                self.finish_event();
                Some(outcome)
            }
            TickOutcome::Idle | TickOutcome::Capturing => None,
        }
    }

    fn finish_event(&mut self) {
        if self.indicator_driven {
            if self.settings.result_hold_ms > 0 {
                self.clock.sleep_ms(self.settings.result_hold_ms);
            }
            self.indicator.set(IndicatorState::OFF);
            self.indicator_driven = false;
        }

        match serde_json::to_string(self.pipeline.stats()) {
            Ok(stats) => log::debug!("Pipeline stats: {}", stats),
            Err(e) => log::debug!("Pipeline stats unavailable: {}", e),
        }
    }

    /// Pause until the next poll
    pub fn wait_next_poll(&self) {
        self.clock.sleep_us(self.settings.poll_interval_us);
    }

    /// Run forever
    pub fn run(&mut self) -> ! {
        log::info!("Press button to start gesture capture");
        loop {
            self.poll_once();
            self.wait_next_poll();
        }
    }
}
