//! Controller family classification.
//!
//! Trigger gating differs by hardware family: Valve/HTC wands require the
//! trackpad to be clicked while deflected, Oculus sticks trigger on
//! deflection alone. The family is derived once per tick from the pairing's
//! manufacturer tag so the gating rule stays centrally testable instead of
//! string comparisons scattered through the trigger logic.

use std::fmt::{self, Display};

/// Trigger-gating family of a controller pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerFamily {
    /// Trigger requires a concurrent digital pad click ("Valve", "HTC").
    ClickGated,

    /// Trigger requires only analog deflection, click ignored ("Oculus").
    DeflectionOnly,

    /// Unknown hardware; no gesture ever fires.
    Unrecognized,
}

impl ControllerFamily {
    /// Classifies a manufacturer tag. Exact, case-sensitive match; an
    /// unmatched tag is a valid classification, not an error.
    pub fn classify(manufacturer: &str) -> Self {
        match manufacturer {
            "Valve" | "HTC" => ControllerFamily::ClickGated,
            "Oculus" => ControllerFamily::DeflectionOnly,
            _ => ControllerFamily::Unrecognized,
        }
    }

    pub fn is_recognized(self) -> bool {
        !matches!(self, ControllerFamily::Unrecognized)
    }
}

impl Display for ControllerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerFamily::ClickGated => write!(f, "ClickGated"),
            ControllerFamily::DeflectionOnly => write!(f, "DeflectionOnly"),
            ControllerFamily::Unrecognized => write!(f, "Unrecognized"),
        }
    }
}
