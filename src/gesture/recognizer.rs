//! Gesture recognition state machine.
//!
//! Converts per-tick analog samples into edge-triggered page-scroll
//! commands. A single shared gesture slot tracks which side most recently
//! fired and when; a held deflection autorepeats once per repeat interval,
//! and the slot is released when the active side recenters (deflection-only
//! hardware) or lets go of the pad click (click-gated hardware).

use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::gesture::profile::ControllerFamily;
use crate::gesture::ScrollCommand;
use crate::input::frame::{AxisSample, Side};

/// Tuning for the gesture recognizer.
///
/// # Performance Impact
///
/// - `deflection_threshold`: Lower values make gestures easier to trigger
///   but pick up stick drift; higher values require deliberate deflection
/// - `repeat_interval_ms`: Lower values scroll faster while held but make
///   single-page scrolls harder to land
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecognizerSettings {
    /// Minimum vertical deflection (absolute) to trigger a scroll.
    ///
    /// Only the vertical axis component is consulted; horizontal deflection
    /// never triggers. Axis values are assumed pre-clamped to `[-1, 1]`.
    pub deflection_threshold: f32,

    /// Cooldown between autorepeat fires on a held input, in milliseconds.
    pub repeat_interval_ms: u64,
}

impl Default for RecognizerSettings {
    fn default() -> Self {
        Self {
            deflection_threshold: 0.2,
            repeat_interval_ms: 500,
        }
    }
}

/// The single shared gesture slot.
///
/// Records which side most recently fired and when. `None` means no side
/// owns an active gesture and the last-fire instant carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq)]
struct GestureSlot {
    side: Side,
    fired_at: DateTime<Local>,
}

/// Per-tick gesture recognizer for the left/right controller pair.
///
/// Only one side can own the slot at a time; both sides share the one
/// cooldown window. State is created empty at startup, mutated exclusively
/// inside [`evaluate_tick`](GestureRecognizer::evaluate_tick), and never
/// persisted.
#[derive(Debug)]
pub struct GestureRecognizer {
    settings: RecognizerSettings,
    slot: Option<GestureSlot>,
}

impl GestureRecognizer {
    pub fn new(settings: Option<RecognizerSettings>) -> Self {
        let settings = settings.unwrap_or_default();
        debug!("Creating gesture recognizer with settings: {:?}", settings);
        Self {
            settings,
            slot: None,
        }
    }

    /// Which side currently owns the gesture slot, if any.
    pub fn active_side(&self) -> Option<Side> {
        self.slot.map(|slot| slot.side)
    }

    pub fn settings(&self) -> &RecognizerSettings {
        &self.settings
    }

    /// Evaluates one tick of both controllers against the shared slot.
    ///
    /// Returns 0, 1, or 2 commands, at most one per side, left evaluated
    /// before right. Slot release is checked after both fire checks so a
    /// release on the active side frees the slot for the other side on a
    /// later tick without waiting out the repeat interval.
    pub fn evaluate_tick(
        &mut self,
        left: &AxisSample,
        right: &AxisSample,
        family: ControllerFamily,
        now: DateTime<Local>,
    ) -> Vec<(Side, ScrollCommand)> {
        let mut commands = Vec::new();

        for (side, sample) in [(Side::Left, left), (Side::Right, right)] {
            if !self.eligible(side, now) {
                continue;
            }
            if let Some(command) = self.trigger(sample, family) {
                debug!("{:?} side fired {:?}", side, command);
                self.slot = Some(GestureSlot {
                    side,
                    fired_at: now,
                });
                commands.push((side, command));
            }
        }

        self.release_if_recentered(left, right, family);

        commands
    }

    /// A side may fire if the slot is free, held by the other side, or the
    /// repeat interval has elapsed since the held side last fired.
    fn eligible(&self, side: Side, now: DateTime<Local>) -> bool {
        match self.slot {
            None => true,
            Some(slot) if slot.side != side => true,
            Some(slot) => {
                now - slot.fired_at
                    >= Duration::milliseconds(self.settings.repeat_interval_ms as i64)
            }
        }
    }

    /// Trigger condition for one sample under the given family.
    fn trigger(&self, sample: &AxisSample, family: ControllerFamily) -> Option<ScrollCommand> {
        let gated = match family {
            ControllerFamily::ClickGated => sample.pad_pressed,
            ControllerFamily::DeflectionOnly => true,
            ControllerFamily::Unrecognized => return None,
        };
        if !gated {
            return None;
        }

        if sample.y > self.settings.deflection_threshold {
            Some(ScrollCommand::PageUp)
        } else if sample.y < -self.settings.deflection_threshold {
            Some(ScrollCommand::PageDown)
        } else {
            None
        }
    }

    /// Releases the slot when the holding side's input has let go.
    ///
    /// Deflection-only: stick returned to the neutral band. Click-gated:
    /// pad no longer pressed. Only the side that holds the slot is
    /// consulted; the other side never releases it.
    fn release_if_recentered(
        &mut self,
        left: &AxisSample,
        right: &AxisSample,
        family: ControllerFamily,
    ) {
        let Some(slot) = self.slot else {
            return;
        };
        let sample = match slot.side {
            Side::Left => left,
            Side::Right => right,
        };

        let released = match family {
            ControllerFamily::DeflectionOnly => {
                sample.y.abs() <= self.settings.deflection_threshold
            }
            ControllerFamily::ClickGated => !sample.pad_pressed,
            ControllerFamily::Unrecognized => false,
        };

        if released {
            debug!("{:?} side recentered, releasing gesture slot", slot.side);
            self.slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> DateTime<Local> {
        Local::now()
    }

    fn at(base: DateTime<Local>, ms: i64) -> DateTime<Local> {
        base + Duration::milliseconds(ms)
    }

    fn deflect(y: f32) -> AxisSample {
        AxisSample::new(0.0, y, false)
    }

    fn deflect_clicked(y: f32) -> AxisSample {
        AxisSample::new(0.0, y, true)
    }

    #[test]
    fn unrecognized_family_never_fires_or_claims_the_slot() {
        let mut recognizer = GestureRecognizer::new(None);
        let now = base();

        let commands = recognizer.evaluate_tick(
            &deflect_clicked(1.0),
            &deflect_clicked(-1.0),
            ControllerFamily::Unrecognized,
            now,
        );

        assert!(commands.is_empty());
        assert_eq!(recognizer.active_side(), None);
    }

    #[test]
    fn deflection_fires_once_and_sets_active_side() {
        let mut recognizer = GestureRecognizer::new(None);
        let now = base();

        let commands = recognizer.evaluate_tick(
            &deflect(0.5),
            &AxisSample::neutral(),
            ControllerFamily::DeflectionOnly,
            now,
        );

        assert_eq!(commands, vec![(Side::Left, ScrollCommand::PageUp)]);
        assert_eq!(recognizer.active_side(), Some(Side::Left));
    }

    #[test]
    fn held_deflection_autorepeats_on_the_repeat_interval() {
        let mut recognizer = GestureRecognizer::new(None);
        let start = base();
        let held = deflect(0.5);
        let neutral = AxisSample::neutral();

        let mut fired = Vec::new();
        for ms in [0, 300, 500, 800] {
            let commands = recognizer.evaluate_tick(
                &held,
                &neutral,
                ControllerFamily::DeflectionOnly,
                at(start, ms),
            );
            if !commands.is_empty() {
                fired.push(ms);
            }
        }

        // First edge at 0, next eligible at >= 500; 300 and 800 fall inside
        // the cooldown of the preceding fire.
        assert_eq!(fired, vec![0, 500]);
    }

    #[test]
    fn click_gated_family_requires_the_pad_click() {
        let mut recognizer = GestureRecognizer::new(None);
        let now = base();

        let commands = recognizer.evaluate_tick(
            &deflect(0.9),
            &AxisSample::neutral(),
            ControllerFamily::ClickGated,
            now,
        );
        assert!(commands.is_empty());
        assert_eq!(recognizer.active_side(), None);

        let commands = recognizer.evaluate_tick(
            &deflect_clicked(0.9),
            &AxisSample::neutral(),
            ControllerFamily::ClickGated,
            now,
        );
        assert_eq!(commands, vec![(Side::Left, ScrollCommand::PageUp)]);
    }

    #[test]
    fn recentering_releases_the_slot_for_the_other_side() {
        let mut recognizer = GestureRecognizer::new(None);
        let start = base();
        let neutral = AxisSample::neutral();

        recognizer.evaluate_tick(&deflect(0.5), &neutral, ControllerFamily::DeflectionOnly, start);
        assert_eq!(recognizer.active_side(), Some(Side::Left));

        // Back inside the neutral band: slot clears
        recognizer.evaluate_tick(
            &deflect(0.1),
            &neutral,
            ControllerFamily::DeflectionOnly,
            at(start, 100),
        );
        assert_eq!(recognizer.active_side(), None);

        // Right fires immediately even though 500ms have not elapsed since
        // the left side's last fire
        let commands = recognizer.evaluate_tick(
            &neutral,
            &deflect(-0.5),
            ControllerFamily::DeflectionOnly,
            at(start, 200),
        );
        assert_eq!(commands, vec![(Side::Right, ScrollCommand::PageDown)]);
        assert_eq!(recognizer.active_side(), Some(Side::Right));
    }

    #[test]
    fn pad_release_recenters_click_gated_hardware() {
        let mut recognizer = GestureRecognizer::new(None);
        let start = base();
        let neutral = AxisSample::neutral();

        recognizer.evaluate_tick(
            &deflect_clicked(0.5),
            &neutral,
            ControllerFamily::ClickGated,
            start,
        );
        assert_eq!(recognizer.active_side(), Some(Side::Left));

        // Still deflected, but the pad is no longer pressed
        recognizer.evaluate_tick(&deflect(0.5), &neutral, ControllerFamily::ClickGated, at(start, 100));
        assert_eq!(recognizer.active_side(), None);
    }

    #[test]
    fn sub_threshold_samples_are_idempotent() {
        let mut recognizer = GestureRecognizer::new(None);
        let start = base();
        let small = deflect(0.15);

        for ms in [0, 50] {
            let commands = recognizer.evaluate_tick(
                &small,
                &small,
                ControllerFamily::DeflectionOnly,
                at(start, ms),
            );
            assert!(commands.is_empty());
            assert_eq!(recognizer.active_side(), None);
        }
    }

    #[test]
    fn direction_follows_the_sign_of_the_vertical_axis() {
        let recognizer = GestureRecognizer::new(None);

        assert_eq!(
            recognizer.trigger(&deflect(0.21), ControllerFamily::DeflectionOnly),
            Some(ScrollCommand::PageUp)
        );
        assert_eq!(
            recognizer.trigger(&deflect(-0.21), ControllerFamily::DeflectionOnly),
            Some(ScrollCommand::PageDown)
        );
        // Exactly at the threshold is inside the neutral band
        assert_eq!(
            recognizer.trigger(&deflect(0.2), ControllerFamily::DeflectionOnly),
            None
        );
        assert_eq!(
            recognizer.trigger(&deflect(-0.2), ControllerFamily::DeflectionOnly),
            None
        );
    }

    #[test]
    fn horizontal_deflection_never_triggers() {
        let mut recognizer = GestureRecognizer::new(None);
        let commands = recognizer.evaluate_tick(
            &AxisSample::new(1.0, 0.0, true),
            &AxisSample::new(-1.0, 0.0, true),
            ControllerFamily::DeflectionOnly,
            base(),
        );
        assert!(commands.is_empty());
    }

    #[test]
    fn both_sides_can_fire_in_one_tick() {
        let mut recognizer = GestureRecognizer::new(None);
        let commands = recognizer.evaluate_tick(
            &deflect(0.5),
            &deflect(-0.5),
            ControllerFamily::DeflectionOnly,
            base(),
        );

        // Left is evaluated first; right then claims the slot from it
        assert_eq!(
            commands,
            vec![
                (Side::Left, ScrollCommand::PageUp),
                (Side::Right, ScrollCommand::PageDown),
            ]
        );
        assert_eq!(recognizer.active_side(), Some(Side::Right));
    }

    #[test]
    fn activity_on_one_side_resets_the_shared_cooldown() {
        // The slot is shared between sides: a fire on the right restarts the
        // cooldown the left side is waiting out.
        let mut recognizer = GestureRecognizer::new(None);
        let start = base();
        let neutral = AxisSample::neutral();

        recognizer.evaluate_tick(&deflect(0.5), &neutral, ControllerFamily::DeflectionOnly, start);
        recognizer.evaluate_tick(
            &deflect(0.5),
            &deflect(0.5),
            ControllerFamily::DeflectionOnly,
            at(start, 300),
        );
        assert_eq!(recognizer.active_side(), Some(Side::Right));

        // 600ms after left's fire, but only 300ms after right claimed the
        // slot; right is the holder now, so left fires as "the other side".
        let commands = recognizer.evaluate_tick(
            &deflect(0.5),
            &neutral,
            ControllerFamily::DeflectionOnly,
            at(start, 600),
        );
        assert_eq!(commands, vec![(Side::Left, ScrollCommand::PageUp)]);
    }
}
