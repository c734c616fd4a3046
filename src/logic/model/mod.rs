//! Model Module - On-device inference
//!
//! Sample window, ONNX classifier and the confidence-gated offload decision.

pub mod buffer;
pub mod inference;
pub mod result;
pub mod threshold;

// Re-export common types
pub use buffer::{BufferStatus, SampleWindow};
pub use inference::{ClassDistribution, ClassScore, EngineStatus, InferenceError, LocalClassifier, OnnxClassifier};
pub use result::{ClassificationResult, ResultSource};
pub use threshold::{OffloadDecision, ThresholdConfig};
