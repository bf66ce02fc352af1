//! Gesture engine with statum state machine for the tick loop
//!
//! Owns the input source, the recognizer, and the bound scroll target, and
//! drives one evaluation per tick. Lifecycle is enforced at compile time
//! with distinct states; nothing is evaluated until a scroll target has
//! been armed.
//!
//! # State Machine
//!
//! ```text
//! Initializing ──► Armed ──► Active ──► Deactivating ──► Deactivated
//!                    (arm)    (loop)       (shutdown)
//! ```
//!
//! # Architecture
//!
//! ```text
//! InputSource ──► TickFrame ──► [classify] ──► GestureRecognizer ──► ScrollTarget
//!                  (per tick)    (family)       (0..=2 commands)
//! ```

use statum::{machine, state};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use crate::gesture::error::EngineError;
use crate::gesture::profile::ControllerFamily;
use crate::gesture::recognizer::{GestureRecognizer, RecognizerSettings};
use crate::gesture::ScrollCommand;
use crate::input::frame::Side;
use crate::input::source::InputSource;
use crate::scroll::ScrollTarget;

/// Settings for the engine's tick loop.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct EngineSettings {
    /// Evaluation interval in milliseconds.
    ///
    /// One recognizer evaluation happens per interval. Matches a host
    /// frame-update cadence; lower values reduce gesture latency at the
    /// cost of CPU.
    pub tick_interval_ms: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 10,
        }
    }
}

/// States for gesture engine lifecycle using statum
#[state]
#[derive(Debug, Clone)]
pub enum GestureEngineState {
    Initializing, // Setting up engine structure
    Armed,        // Scroll target acquired and bound
    Active,       // Evaluating ticks in main loop
    Deactivating, // Shutting down gracefully
    Deactivated,  // Fully stopped, ready for cleanup
}

/// Gesture engine with compile-time state safety via statum
///
/// Holds the only reference to the recognizer state; all mutation happens
/// inside the single tick loop, so no synchronization is needed.
#[machine]
pub struct GestureEngine<S: GestureEngineState> {
    source: Box<dyn InputSource>,
    recognizer: GestureRecognizer,
    target: Option<Box<dyn ScrollTarget>>,
    settings: EngineSettings,
    name: String,
}

impl<S: GestureEngineState> GestureEngine<S> {
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn active_side(&self) -> Option<Side> {
        self.recognizer.active_side()
    }
}

impl GestureEngine<Initializing> {
    pub fn create(
        source: Box<dyn InputSource>,
        recognizer_settings: Option<RecognizerSettings>,
        settings: Option<EngineSettings>,
        name: String,
    ) -> Self {
        info!("Initializing new gesture engine: {}", name);

        Self::new(
            source,
            GestureRecognizer::new(recognizer_settings),
            None, // target
            settings.unwrap_or_default(),
            name,
        )
    }

    /// Binds the scroll target and transitions to Armed state
    ///
    /// This is the "gesture target acquired" hook: until a scrollable view
    /// is bound the engine does nothing.
    pub fn arm(mut self, target: Box<dyn ScrollTarget>) -> GestureEngine<Armed> {
        info!("Scroll target acquired, arming engine: {}", self.name);
        self.target = Some(target);
        self.transition()
    }
}

impl GestureEngine<Armed> {
    pub fn activate(self) -> GestureEngine<Active> {
        info!("Activating gesture engine: {}", self.name);
        self.transition()
    }
}

impl GestureEngine<Active> {
    /// Runs one evaluation tick.
    ///
    /// A source with no usable input this tick is skipped silently; the
    /// recognizer is only invoked on complete frames. Returns the number of
    /// commands dispatched.
    pub fn run_tick(&mut self) -> usize {
        let Some(frame) = self.source.next_frame() else {
            debug!("No input this tick");
            return 0;
        };

        // Classify the pairing once per tick, never per side
        let family = ControllerFamily::classify(&frame.manufacturer);

        let commands =
            self.recognizer
                .evaluate_tick(&frame.left, &frame.right, family, frame.timestamp);

        for (side, command) in &commands {
            self.dispatch(*side, *command);
        }

        commands.len()
    }

    fn dispatch(&mut self, side: Side, command: ScrollCommand) {
        let Some(target) = &mut self.target else {
            // No scrollable content bound right now; commands are discarded
            debug!("No scroll target bound, discarding {:?}", command);
            return;
        };

        info!("Dispatching {:?} ({:?} side)", command, side);
        match command {
            ScrollCommand::PageUp => target.page_scroll_up(),
            ScrollCommand::PageDown => target.page_scroll_down(),
        }
    }

    /// Main tick loop with graceful shutdown support
    ///
    /// Runs until the shutdown signal is received, evaluating one tick per
    /// interval. Dispatch happens synchronously inside the loop.
    pub async fn run_until_shutdown(
        mut self,
        mut shutdown_rx: oneshot::Receiver<()>,
    ) -> Result<GestureEngine<Deactivating>, EngineError> {
        info!("Starting tick loop for: {}", self.name);

        let mut ticker = interval(Duration::from_millis(self.settings.tick_interval_ms));

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => {
                    info!("Shutdown signal received for: {}", self.name);
                    break;
                }

                _ = ticker.tick() => {
                    self.run_tick();
                }
            }
        }

        info!("Transitioning to Deactivating state: {}", self.name);
        Ok(self.transition())
    }

    pub fn deactivate(self) -> GestureEngine<Deactivating> {
        info!("Deactivating gesture engine: {}", self.name);
        self.transition()
    }
}

impl GestureEngine<Deactivating> {
    /// Drops the scroll target binding and transitions to Deactivated state
    pub fn shutdown(mut self) -> GestureEngine<Deactivated> {
        info!("Shutting down gesture engine: {}", self.name);
        self.target = None;
        self.transition()
    }
}

impl GestureEngine<Deactivated> {}

/// Handle for managing the gesture engine in a tokio task
///
/// The explicitly constructed and destroyed context object that owns the
/// tick loop. Handles task spawning, graceful shutdown, and resource
/// cleanup; there is no process-wide singleton.
pub struct GestureEngineHandle {
    pub name: String,

    task_handle: Option<JoinHandle<Result<(), EngineError>>>,

    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl GestureEngineHandle {
    /// Creates, arms, and activates an engine, then spawns its tick loop.
    pub fn start(
        source: Box<dyn InputSource>,
        target: Box<dyn ScrollTarget>,
        recognizer_settings: Option<RecognizerSettings>,
        settings: Option<EngineSettings>,
        name: String,
    ) -> Self {
        let engine = GestureEngine::create(source, recognizer_settings, settings, name.clone())
            .arm(target)
            .activate();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let engine_name = name.clone();
        let task_handle = tokio::spawn(async move {
            info!("Spawning running engine: {}", engine_name);
            match engine.run_until_shutdown(shutdown_rx).await {
                Ok(deactivating_engine) => {
                    info!("Engine entering deactivating state: {}", engine_name);
                    let _ = deactivating_engine.shutdown();
                    Ok(())
                }
                Err(e) => {
                    error!("Error running engine: {} - {}", engine_name, e);
                    Err(e)
                }
            }
        });

        info!("Gesture engine activated: {}", name);
        Self {
            name,
            task_handle: Some(task_handle),
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Gracefully shuts down the engine and waits for task completion
    pub async fn shutdown(&mut self) -> Result<(), EngineError> {
        debug!("Sending shutdown signal to engine: {}", self.name);

        if let Some(tx) = self.shutdown_tx.take() {
            if tx.send(()).is_err() {
                warn!("Engine task already terminated: {}", self.name);
            }
        }

        if let Some(handle) = self.task_handle.take() {
            match handle.await {
                Ok(result) => {
                    debug!("Engine task completed: {}", self.name);
                    result
                }
                Err(e) => {
                    error!("Engine task panicked: {} - {}", self.name, e);
                    Err(EngineError::TaskError(format!(
                        "Engine task panicked: {}",
                        e
                    )))
                }
            }
        } else {
            debug!("Engine already shut down: {}", self.name);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::frame::{AxisSample, TickFrame};
    use crate::input::source::ScriptedSource;
    use std::sync::{Arc, Mutex};

    struct RecordingTarget {
        commands: Arc<Mutex<Vec<ScrollCommand>>>,
    }

    impl ScrollTarget for RecordingTarget {
        fn page_scroll_up(&mut self) {
            self.commands.lock().unwrap().push(ScrollCommand::PageUp);
        }

        fn page_scroll_down(&mut self) {
            self.commands.lock().unwrap().push(ScrollCommand::PageDown);
        }
    }

    fn recording_target() -> (Box<dyn ScrollTarget>, Arc<Mutex<Vec<ScrollCommand>>>) {
        let commands = Arc::new(Mutex::new(Vec::new()));
        let target = RecordingTarget {
            commands: commands.clone(),
        };
        (Box::new(target), commands)
    }

    fn frame(manufacturer: &str, left_y: f32, right_y: f32, clicked: bool) -> TickFrame {
        TickFrame::new(
            manufacturer,
            AxisSample::new(0.0, left_y, clicked),
            AxisSample::new(0.0, right_y, clicked),
        )
    }

    #[test]
    fn engine_forwards_commands_to_the_armed_target() {
        let source = ScriptedSource::from_frames(vec![
            frame("Oculus", 0.5, 0.0, false),
            frame("Oculus", 0.0, 0.0, false),
            frame("Oculus", 0.0, -0.5, false),
        ]);
        let (target, commands) = recording_target();

        let mut engine = GestureEngine::create(Box::new(source), None, None, "test".to_string())
            .arm(target)
            .activate();

        assert_eq!(engine.run_tick(), 1);
        assert_eq!(engine.run_tick(), 0); // recentering tick
        assert_eq!(engine.run_tick(), 1);

        assert_eq!(
            *commands.lock().unwrap(),
            vec![ScrollCommand::PageUp, ScrollCommand::PageDown]
        );
    }

    #[test]
    fn engine_skips_ticks_without_input() {
        let (target, commands) = recording_target();
        let mut engine = GestureEngine::create(
            Box::new(ScriptedSource::new()),
            None,
            None,
            "test".to_string(),
        )
        .arm(target)
        .activate();

        assert_eq!(engine.run_tick(), 0);
        assert!(commands.lock().unwrap().is_empty());
        assert_eq!(engine.active_side(), None);
    }

    #[test]
    fn unrecognized_hardware_scrolls_nothing() {
        let source = ScriptedSource::from_frames(vec![
            frame("Generic Gamepad", 1.0, -1.0, true),
            frame("Generic Gamepad", 1.0, -1.0, true),
        ]);
        let (target, commands) = recording_target();
        let mut engine = GestureEngine::create(Box::new(source), None, None, "test".to_string())
            .arm(target)
            .activate();

        assert_eq!(engine.run_tick(), 0);
        assert_eq!(engine.run_tick(), 0);
        assert!(commands.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn handle_starts_and_shuts_down_cleanly() {
        let source = ScriptedSource::from_frames(vec![frame("Oculus", 0.5, 0.0, false)]);
        let (target, commands) = recording_target();

        let mut handle = GestureEngineHandle::start(
            Box::new(source),
            target,
            None,
            Some(EngineSettings {
                tick_interval_ms: 1,
            }),
            "test-engine".to_string(),
        );

        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.shutdown().await.expect("clean shutdown");
        // Repeated shutdown is a no-op
        handle.shutdown().await.expect("idempotent shutdown");

        assert_eq!(*commands.lock().unwrap(), vec![ScrollCommand::PageUp]);
    }
}
