//! Sample Window - Buffer management for ML input
//!
//! Fixed-capacity store of interleaved xyz samples for one capture.
//! Capacity is set by the classifier input size and never grows; writes
//! past it are dropped.

use serde::{Deserialize, Serialize};

use crate::constants::{AXIS_COUNT, FEATURE_SIZE, WINDOW_SAMPLES};
use crate::logic::sensor::AccelSample;

#[derive(Debug, Clone, PartialEq)]
pub struct SampleWindow {
    features: [f32; FEATURE_SIZE],
    samples_written: usize,
}

impl Default for SampleWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleWindow {
    pub fn new() -> Self {
        Self {
            features: [0.0; FEATURE_SIZE],
            samples_written: 0,
        }
    }

    /// Zero every slot and rewind the write cursor
    pub fn reset(&mut self) {
        self.features = [0.0; FEATURE_SIZE];
        self.samples_written = 0;
    }

    /// Append a sample at the next free slot.
    ///
    /// Returns `false` when the window is already full and the sample was dropped.
    pub fn push(&mut self, sample: AccelSample) -> bool {
        if self.samples_written >= WINDOW_SAMPLES {
            return false;
        }

        let idx = self.samples_written * AXIS_COUNT;
        self.features[idx] = sample.x;
        self.features[idx + 1] = sample.y;
        self.features[idx + 2] = sample.z;
        self.samples_written += 1;
        true
    }

    pub fn samples_written(&self) -> usize {
        self.samples_written
    }

    pub fn capacity(&self) -> usize {
        WINDOW_SAMPLES
    }

    /// Enough samples for a full classifier frame
    pub fn has_full_frame(&self) -> bool {
        self.samples_written * AXIS_COUNT >= FEATURE_SIZE
    }

    /// Flattened view in capture order (x0, y0, z0, x1, ...)
    pub fn as_slice(&self) -> &[f32] {
        &self.features
    }

    pub fn sample(&self, index: usize) -> Option<AccelSample> {
        if index >= self.samples_written {
            return None;
        }
        let idx = index * AXIS_COUNT;
        Some(AccelSample::new(
            self.features[idx],
            self.features[idx + 1],
            self.features[idx + 2],
        ))
    }

    pub fn status(&self) -> BufferStatus {
        BufferStatus {
            current_size: self.samples_written,
            required_size: WINDOW_SAMPLES,
            is_ready: self.has_full_frame(),
            fill_percent: (self.samples_written as f32 / WINDOW_SAMPLES as f32 * 100.0).min(100.0),
        }
    }
}

/// Buffer status information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BufferStatus {
    pub current_size: usize,
    pub required_size: usize,
    pub is_ready: bool,
    pub fill_percent: f32,
}
