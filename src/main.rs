pub mod config;
pub mod gesture;
pub mod input;
pub mod scroll;

use crate::config::AppSettings;
use crate::gesture::GestureEngineHandle;
use crate::input::{GamepadSource, InputSource, ScriptedSource};
use crate::scroll::ListScrollTarget;
use color_eyre::Result;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let settings = AppSettings::load().unwrap_or_else(|e| {
        warn!("Failed to load settings ({}), using defaults", e);
        AppSettings::default()
    });

    info!("Starting padscroll with settings: {:?}", settings);

    // Prefer real hardware; fall back to an empty scripted source so the
    // engine idles instead of aborting when no backend is available.
    let source: Box<dyn InputSource> = match GamepadSource::new(Some(settings.gamepad.clone())) {
        Ok(source) => Box::new(source),
        Err(e) => {
            warn!("Gamepad backend unavailable ({}), idling without input", e);
            Box::new(ScriptedSource::new())
        }
    };

    let target = Box::new(ListScrollTarget::new(
        settings.demo_item_count,
        settings.demo_page_size,
    ));

    let mut engine_handle = GestureEngineHandle::start(
        source,
        target,
        Some(settings.recognizer),
        Some(settings.engine),
        "menu-scroll".to_string(),
    );

    info!("Engine running, press Ctrl-C to exit");
    tokio::signal::ctrl_c().await?;

    info!("Shutting down");
    engine_handle.shutdown().await?;

    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
