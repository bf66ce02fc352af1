//! Page-scroll gesture recognition for the left/right controller pair.
//!
//! Converts per-tick analog readings ([`TickFrame`](crate::input::TickFrame))
//! into edge-triggered [`ScrollCommand`]s. The recognizer is a small state
//! machine built around a single shared gesture slot; the engine wraps it
//! in a statum lifecycle and drives it from a tokio tick loop.

pub mod engine;
pub mod error;
pub mod profile;
pub mod recognizer;

// Re-exports for easier access
pub use engine::{EngineSettings, GestureEngine, GestureEngineHandle, GestureEngineState};
pub use error::EngineError;
pub use profile::ControllerFamily;
pub use recognizer::{GestureRecognizer, RecognizerSettings};

/// Page-level scroll command emitted by the recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollCommand {
    /// Scroll the bound list view up one page
    PageUp,

    /// Scroll the bound list view down one page
    PageDown,
}
