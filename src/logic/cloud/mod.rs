//! Cloud Module - Device to remote gesture service
//!
//! This module handles:
//! - Raw-window offload to the Remote Classifier
//! - Gesture logging

pub mod client;

pub use client::{
    parse_predict_response, CloudClient, CloudConfig, CloudError, GestureLogEntry, GestureLogger,
    RemoteClassifier,
};
