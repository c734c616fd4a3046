//! Accelerometer input
//!
//! The physical sensor is an external collaborator. On host builds the
//! samples come from a recorded CSV (`x,y,z` per row) that is replayed in a
//! loop.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One tri-axial reading (m/s²)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AccelSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl AccelSample {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Error)]
pub enum SensorError {
    #[error("sensor read failed: {0}")]
    Read(String),

    #[error("replay file {path}: {source}")]
    Replay {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("replay file {0} contains no samples")]
    EmptyReplay(String),
}

/// Source of accelerometer readings, polled by the capture scheduler
pub trait AccelerometerSource {
    fn read(&mut self) -> Result<AccelSample, SensorError>;
}

/// Replays a recorded gesture from CSV, wrapping around at the end
pub struct ReplaySource {
    samples: Vec<AccelSample>,
    cursor: usize,
}

impl ReplaySource {
    /// Load `x,y,z` rows (with header) from a CSV file
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self, SensorError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| SensorError::Replay { path: display.clone(), source: e })?;

        let mut samples = Vec::new();
        for row in reader.deserialize::<AccelSample>() {
            let sample = row.map_err(|e| SensorError::Replay { path: display.clone(), source: e })?;
            samples.push(sample);
        }

        if samples.is_empty() {
            return Err(SensorError::EmptyReplay(display));
        }

        log::info!("Loaded {} replay samples from {}", samples.len(), display);
        Ok(Self { samples, cursor: 0 })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }
}

impl AccelerometerSource for ReplaySource {
    fn read(&mut self) -> Result<AccelSample, SensorError> {
        let sample = self.samples[self.cursor];
        self.cursor = (self.cursor + 1) % self.samples.len();
        Ok(sample)
    }
}
