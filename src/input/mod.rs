//! Input subsystem for per-tick controller sampling
//!
//! Supplies the gesture engine with one [`TickFrame`] per tick: a 2-axis
//! reading plus a digital click flag for each of the left and right
//! controllers, together with the pairing's manufacturer tag.
//!
//! # Architecture
//!
//! ```text
//! Gamepad ──► GamepadSource ──► TickFrame ──► GestureEngine
//!             (gilrs polling)   (per tick)
//! ```
//!
//! [`ScriptedSource`] provides a deterministic replacement for tests and
//! demos. A source that has no usable device for a tick returns `None`
//! instead of a frame and the engine skips evaluation for that tick.

pub mod frame;
pub mod gamepad_source;
pub mod source;

pub use frame::{AxisSample, Side, TickFrame};
pub use gamepad_source::{GamepadSettings, GamepadSource};
pub use source::{InputSource, ScriptedSource, SourceError};
