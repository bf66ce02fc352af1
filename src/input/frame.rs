use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

// Which physical controller a sample belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// One analog reading for one controller, captured once per tick.
///
/// Axis values are expected to already be clamped to `[-1.0, 1.0]` by the
/// input layer. `pad_pressed` is only meaningful for click-gated controller
/// families; deflection-only hardware reports it as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisSample {
    pub x: f32,
    pub y: f32,
    pub pad_pressed: bool,
}

impl AxisSample {
    pub fn new(x: f32, y: f32, pad_pressed: bool) -> Self {
        Self { x, y, pad_pressed }
    }

    /// Neutral stick, pad released.
    pub fn neutral() -> Self {
        Self::default()
    }
}

/// Complete per-tick reading from both controllers.
///
/// The manufacturer tag is read once per frame, not per side; in practice
/// both controllers in a pairing are the same hardware family.
#[derive(Debug, Clone)]
pub struct TickFrame {
    pub manufacturer: String,
    pub left: AxisSample,
    pub right: AxisSample,
    pub timestamp: DateTime<Local>,
}

impl TickFrame {
    pub fn new(manufacturer: impl Into<String>, left: AxisSample, right: AxisSample) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            left,
            right,
            timestamp: Local::now(),
        }
    }
}
