//! Logic Module - Gesture capture and classification
//!
//! ## Layout
//! - `capture/` - Button-triggered sampling window
//! - `model/` - Sample window, ONNX inference, offload threshold
//! - `cloud/` - Remote Classifier and gesture log over HTTP
//! - `response/` - Indicator and result reconciliation
//! - `pipeline` / `control_loop` - Per-event flow and the poll loop

pub mod config;
pub mod error;
pub mod sensor;
pub mod trigger;

pub mod capture;
pub mod cloud;
pub mod model;
pub mod response;

pub mod pipeline;
pub mod control_loop;

#[cfg(test)]
mod testing;
