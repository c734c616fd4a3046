//! Capture Module - Button-triggered sampling window

pub mod scheduler;


pub use scheduler::{CaptureScheduler, CaptureSession, CaptureState, CaptureSummary, CaptureTiming, TickOutcome};
