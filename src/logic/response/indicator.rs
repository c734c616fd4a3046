//! Indicator (RGB LED)
//!
//! Three independent on/off channels. The state for a gesture is a pure
//! function of its label.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndicatorState {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

/// Gesture label → colour. Labels missing here map to `OFF`.
const LABEL_COLOURS: [(&str, IndicatorState); 3] = [
    ("Z", IndicatorState::RED),
    ("V", IndicatorState::GREEN),
    ("O", IndicatorState::BLUE),
];

impl IndicatorState {
    pub const OFF: Self = Self { red: false, green: false, blue: false };
    pub const RED: Self = Self { red: true, green: false, blue: false };
    pub const GREEN: Self = Self { red: false, green: true, blue: false };
    pub const BLUE: Self = Self { red: false, green: false, blue: true };
    /// Shown while a capture is running
    pub const WHITE: Self = Self { red: true, green: true, blue: true };

    pub fn for_label(label: &str) -> Self {
        LABEL_COLOURS
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, state)| *state)
            .unwrap_or(Self::OFF)
    }

    pub fn is_off(&self) -> bool {
        *self == Self::OFF
    }

    pub fn name(&self) -> &'static str {
        match (self.red, self.green, self.blue) {
            (false, false, false) => "off",
            (true, false, false) => "red",
            (false, true, false) => "green",
            (false, false, true) => "blue",
            (true, true, true) => "white",
            _ => "mixed",
        }
    }
}

/// Physical indicator output
pub trait Indicator {
    fn set(&mut self, state: IndicatorState);
}

/// Host indicator: writes the colour to the log
#[derive(Debug, Default)]
pub struct LogIndicator {
    current: IndicatorState,
}

impl LogIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> IndicatorState {
        self.current
    }
}

impl Indicator for LogIndicator {
    fn set(&mut self, state: IndicatorState) {
        self.current = state;
        log::info!(
            "LED {} (r={} g={} b={})",
            state.name(),
            state.red as u8,
            state.green as u8,
            state.blue as u8
        );
    }
}
