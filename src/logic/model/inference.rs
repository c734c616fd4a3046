//! Inference Engine - ONNX Runtime Integration
//!
//! Loads the gesture model and turns one full sample window into a
//! per-label probability vector. Decision logic lives in `threshold`.

use std::sync::atomic::{AtomicU64, Ordering};

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::buffer::SampleWindow;
use crate::constants::FEATURE_SIZE;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Raw score for one label (probability, 0.0 - 1.0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassScore {
    pub label: String,
    pub value: f32,
}

/// Classifier output, in label declaration order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassDistribution {
    pub scores: Vec<ClassScore>,
}

impl ClassDistribution {
    pub fn new(labels: &[String], values: &[f32]) -> Self {
        Self {
            scores: labels
                .iter()
                .zip(values)
                .map(|(label, &value)| ClassScore { label: label.clone(), value })
                .collect(),
        }
    }

    /// Highest-scoring label.
    ///
    /// First index wins ties (strict greater-than scan). `None` when no
    /// score is above zero.
    pub fn top(&self) -> Option<(usize, &ClassScore)> {
        let mut max_value = 0.0f32;
        let mut max_index = None;

        for (i, score) in self.scores.iter().enumerate() {
            if score.value > max_value {
                max_value = score.value;
                max_index = Some(i);
            }
        }

        max_index.map(|i| (i, &self.scores[i]))
    }
}

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub labels: Vec<String>,
    pub features: usize,
    pub output_name: String,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Engine status for diagnostics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub model_name: String,
    pub inference_device: String,
    pub avg_latency_ms: f32,
    pub inference_count: u64,
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Clone, Error, PartialEq)]
#[error("InferenceError: {0}")]
pub struct InferenceError(pub String);

// ============================================================================
// LOCAL CLASSIFIER TRAIT
// ============================================================================

/// On-device classifier capability
pub trait LocalClassifier {
    fn classify(&self, window: &SampleWindow) -> Result<ClassDistribution, InferenceError>;
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

pub struct OnnxClassifier {
    session: Mutex<Option<Session>>,
    metadata: Option<ModelMetadata>,
    labels: Vec<String>,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl OnnxClassifier {
    /// Classifier with no model; every `classify` call fails
    pub fn unloaded(labels: Vec<String>) -> Self {
        Self {
            session: Mutex::new(None),
            metadata: None,
            labels,
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        }
    }

    /// Load ONNX model from file
    pub fn load(model_path: &str, labels: Vec<String>) -> Result<Self, InferenceError> {
        let mut classifier = Self::unloaded(labels);
        classifier.load_model(model_path)?;
        Ok(classifier)
    }

    pub fn load_model(&mut self, model_path: &str) -> Result<(), InferenceError> {
        log::info!("Loading ONNX model from: {}", model_path);

        if !std::path::Path::new(model_path).exists() {
            return Err(InferenceError(format!("Model not found: {}", model_path)));
        }

        let session = Session::builder()
            .map_err(|e| InferenceError(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| InferenceError(format!("Failed to load model: {}", e)))?;

        let output_name = session.outputs.first()
            .map(|o| o.name.clone())
            .ok_or_else(|| InferenceError("No output defined".to_string()))?;

        log::info!("ONNX model loaded ({} labels, output '{}')", self.labels.len(), output_name);

        *self.session.lock() = Some(session);
        self.metadata = Some(ModelMetadata {
            model_path: model_path.to_string(),
            labels: self.labels.clone(),
            features: FEATURE_SIZE,
            output_name,
            loaded_at: chrono::Utc::now(),
        });

        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.session.lock().is_some()
    }

    pub fn metadata(&self) -> Option<&ModelMetadata> {
        self.metadata.as_ref()
    }

    pub fn status(&self) -> EngineStatus {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        EngineStatus {
            model_loaded: self.metadata.is_some(),
            model_name: self.metadata.as_ref()
                .map(|m| m.model_path.clone())
                .unwrap_or_else(|| "None".to_string()),
            inference_device: "ONNX Runtime (CPU)".to_string(),
            avg_latency_ms: avg,
            inference_count: count,
        }
    }

    fn run_session(&self, window: &SampleWindow) -> Result<Vec<f32>, InferenceError> {
        let mut session_guard = self.session.lock();
        let session = session_guard.as_mut()
            .ok_or_else(|| InferenceError("Model not loaded".to_string()))?;

        let output_name = self.metadata.as_ref()
            .map(|m| m.output_name.clone())
            .ok_or_else(|| InferenceError("No output defined".to_string()))?;

        let input_array = Array2::<f32>::from_shape_vec(
            (1, FEATURE_SIZE),
            window.as_slice().to_vec(),
        ).map_err(|e| InferenceError(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError(format!("Tensor error: {}", e)))?;

        let outputs = session.run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError(format!("Inference failed: {}", e)))?;

        let output = outputs.get(&output_name)
            .ok_or_else(|| InferenceError("No output".to_string()))?;

        let output_tensor = output.try_extract_tensor::<f32>()
            .map_err(|e| InferenceError(format!("Extract error: {}", e)))?;

        Ok(output_tensor.1.to_vec())
    }
}

impl LocalClassifier for OnnxClassifier {
    fn classify(&self, window: &SampleWindow) -> Result<ClassDistribution, InferenceError> {
        let start_time = std::time::Instant::now();

        let values = self.run_session(window)?;
        if values.len() != self.labels.len() {
            return Err(InferenceError(format!(
                "Model returned {} scores for {} labels",
                values.len(),
                self.labels.len()
            )));
        }

        let elapsed = start_time.elapsed().as_micros() as u64;
        self.latency_sum_us.fetch_add(elapsed, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);
        log::debug!("Local inference took {} us", elapsed);

        Ok(ClassDistribution::new(&self.labels, &values))
    }
}
