//! Classification result shared by the local and remote paths

use serde::{Deserialize, Serialize};

/// Where an authoritative result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultSource {
    Local,
    Remote,
}

impl ResultSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultSource::Local => "local",
            ResultSource::Remote => "remote",
        }
    }
}

/// One gesture label with its confidence in percent (0 - 100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: String,
    pub confidence: f32,
    pub source: ResultSource,
}

impl ClassificationResult {
    pub fn local(label: impl Into<String>, confidence: f32) -> Self {
        Self { label: label.into(), confidence, source: ResultSource::Local }
    }

    pub fn remote(label: impl Into<String>, confidence: f32) -> Self {
        Self { label: label.into(), confidence, source: ResultSource::Remote }
    }
}
