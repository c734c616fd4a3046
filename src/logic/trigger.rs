//! Trigger input (button)
//!
//! Only the released→pressed transition counts. Holding the button does not
//! re-trigger.

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Level-sampled binary input
pub trait TriggerInput {
    /// Current level; `true` while pressed
    fn is_pressed(&mut self) -> bool;
}

/// Rising-edge detector
#[derive(Debug, Default, Clone)]
pub struct EdgeDetector {
    was_pressed: bool,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current level, returns true on a press transition
    pub fn update(&mut self, pressed: bool) -> bool {
        let edge = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        edge
    }
}

/// Host trigger: every line on stdin is one short press
pub struct StdinTrigger {
    pending: Arc<AtomicBool>,
}

impl StdinTrigger {
    pub fn spawn() -> Self {
        let pending = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&pending);

        thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                if line.is_err() {
                    break;
                }
                flag.store(true, Ordering::Relaxed);
            }
            log::debug!("stdin closed, trigger thread exiting");
        });

        Self { pending }
    }
}

impl TriggerInput for StdinTrigger {
    fn is_pressed(&mut self) -> bool {
        // A press reads as high for exactly one poll, then released.
        self.pending.swap(false, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_only_on_press_transition() {
        let mut edge = EdgeDetector::new();

        assert!(!edge.update(false));
        assert!(edge.update(true));
        // held down
        assert!(!edge.update(true));
        assert!(!edge.update(true));
        assert!(!edge.update(false));
        assert!(edge.update(true));
    }
}
