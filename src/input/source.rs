use std::collections::VecDeque;

use crate::input::frame::TickFrame;

// Source errors
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to initialize input source: {0}")]
    InitializationError(String),

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Supplier of per-tick controller readings.
///
/// `next_frame` returning `None` means "no usable input this tick" (no
/// device connected, or the device dropped mid-session). The caller must
/// skip gesture evaluation for that tick; it is not an error condition.
pub trait InputSource: Send + 'static {
    fn next_frame(&mut self) -> Option<TickFrame>;
}

/// Deterministic in-memory source for tests and demos.
///
/// Frames are replayed in the order they were queued; once the queue is
/// drained the source reports "no input" forever.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    frames: VecDeque<TickFrame>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_frames(frames: impl IntoIterator<Item = TickFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn push(&mut self, frame: TickFrame) {
        self.frames.push_back(frame);
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedSource {
    fn next_frame(&mut self) -> Option<TickFrame> {
        self.frames.pop_front()
    }
}
