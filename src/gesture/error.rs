//! Error definitions for the gesture engine.
//!
//! The recognizer itself has no failure modes: every sample, timestamp, and
//! manufacturer tag is a valid input, and an unrecognized family is a
//! classification, not an error. These errors belong to the engine plumbing
//! around it.

use thiserror::Error;

use crate::input::source::SourceError;

/// Error types for the gesture engine lifecycle
#[derive(Debug, Error)]
pub enum EngineError {
    /// Error during engine initialization
    #[error("Initialization error: {0}")]
    InitializationError(String),

    /// Error from the input source backend
    #[error("Input source error: {0}")]
    SourceError(#[from] SourceError),

    /// Error in task management
    #[error("Task error: {0}")]
    TaskError(String),
}
