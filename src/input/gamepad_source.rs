//! gilrs-backed input source.
//!
//! Polls a single active gamepad and folds its stick and thumb-click events
//! into cached left/right [`AxisSample`]s, one complete [`TickFrame`] per
//! tick. Left stick + left thumb click stand in for the left controller,
//! right stick + right thumb click for the right one.

use chrono::Local;
use gilrs::{Axis, Button, Event, EventType, Gamepad, GamepadId, Gilrs};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::input::frame::{AxisSample, TickFrame};
use crate::input::source::{InputSource, SourceError};

/// Settings for the gamepad polling backend.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GamepadSettings {
    /// Manufacturer tag reported in each frame instead of the value derived
    /// from the device.
    ///
    /// Gesture gating is keyed on the manufacturer tag (`"Valve"`, `"HTC"`,
    /// `"Oculus"`), and most desktop gamepads report neither, so an override
    /// is the practical way to exercise the recognizer with ordinary
    /// hardware.
    pub manufacturer_override: Option<String>,
}

/// Input source that reads the first connected gamepad through gilrs.
pub struct GamepadSource {
    gilrs: Gilrs,
    active_gamepad: Option<GamepadId>,
    settings: GamepadSettings,

    // Cached per-side state, updated from the gilrs event stream
    left: AxisSample,
    right: AxisSample,
}

impl GamepadSource {
    pub fn new(settings: Option<GamepadSettings>) -> Result<Self, SourceError> {
        let settings = settings.unwrap_or_default();

        info!("Initializing gilrs controller interface");
        let gilrs = match Gilrs::new() {
            Ok(g) => {
                info!("Successfully initialized gilrs");
                g
            }
            Err(e) => {
                return Err(SourceError::InitializationError(e.to_string()));
            }
        };

        let mut source = Self {
            gilrs,
            active_gamepad: None,
            settings,
            left: AxisSample::neutral(),
            right: AxisSample::neutral(),
        };
        source.select_gamepad();
        Ok(source)
    }

    fn select_gamepad(&mut self) {
        let gamepads: Vec<(GamepadId, Gamepad<'_>)> = self.gilrs.gamepads().collect();

        if gamepads.is_empty() {
            warn!("No gamepad connected, continuing in idle mode");
            return;
        }

        info!("Found {} gamepad(s):", gamepads.len());
        for (idx, (id, gamepad)) in gamepads.iter().enumerate() {
            info!("  [{}] ID: {}, Name: {}", idx, id, gamepad.name());
        }

        let (id, gamepad) = &gamepads[0];
        self.active_gamepad = Some(*id);
        info!("Selected gamepad: {} ({})", gamepad.name(), id);
    }

    /// Derives the manufacturer tag for the active gamepad.
    ///
    /// Known VR vendor ids map to the tags the gesture profile recognizes;
    /// anything else falls back to the device name, which classification
    /// treats as unrecognized.
    fn manufacturer_tag(&self, id: GamepadId) -> String {
        if let Some(tag) = &self.settings.manufacturer_override {
            return tag.clone();
        }

        let gamepad = self.gilrs.gamepad(id);
        match gamepad.vendor_id() {
            Some(0x28de) => "Valve".to_string(),
            Some(0x0bb4) => "HTC".to_string(),
            Some(0x2833) => "Oculus".to_string(),
            _ => gamepad.name().to_string(),
        }
    }

    fn apply_event(&mut self, event: EventType) {
        match event {
            EventType::AxisChanged(axis, value, _) => {
                let value = clamp_axis(value);
                match axis {
                    Axis::LeftStickX => self.left.x = value,
                    Axis::LeftStickY => self.left.y = value,
                    Axis::RightStickX => self.right.x = value,
                    Axis::RightStickY => self.right.y = value,
                    _ => debug!("Ignoring unsupported axis: {:?}", axis),
                }
            }
            EventType::ButtonPressed(Button::LeftThumb, _) => self.left.pad_pressed = true,
            EventType::ButtonReleased(Button::LeftThumb, _) => self.left.pad_pressed = false,
            EventType::ButtonPressed(Button::RightThumb, _) => self.right.pad_pressed = true,
            EventType::ButtonReleased(Button::RightThumb, _) => self.right.pad_pressed = false,
            EventType::Connected => {
                info!("Controller connected event detected");
                if self.active_gamepad.is_none() {
                    self.select_gamepad();
                }
            }
            EventType::Disconnected => {
                warn!("Controller disconnected event detected");
            }
            _ => debug!("Unhandled event type: {:?}", event),
        }
    }
}

impl InputSource for GamepadSource {
    fn next_frame(&mut self) -> Option<TickFrame> {
        // Drain everything gilrs buffered since the last tick
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            if let Some(active_id) = self.active_gamepad {
                if id != active_id {
                    debug!("Skipping event from non-active gamepad: {:?}", id);
                    continue;
                }
            }
            self.apply_event(event);
        }

        let id = self.active_gamepad?;
        if !self.gilrs.gamepad(id).is_connected() {
            warn!("Active gamepad no longer connected, dropping it");
            self.active_gamepad = None;
            self.left = AxisSample::neutral();
            self.right = AxisSample::neutral();
            return None;
        }

        Some(TickFrame {
            manufacturer: self.manufacturer_tag(id),
            left: self.left,
            right: self.right,
            timestamp: Local::now(),
        })
    }
}

fn clamp_axis(value: f32) -> f32 {
    value.clamp(-1.0, 1.0)
}
