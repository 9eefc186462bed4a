//! Grievance Portal - headless landing-page session.
//!
//! # Overview
//!
//! This binary wires the portal's UI-state core together without a renderer:
//! - Logging infrastructure (file rotation + optional console output)
//! - Tokio runtime (timers for the carousel and simulated submissions)
//! - Configuration loading ([`ConfigManager`])
//! - Shell state with the persisted theme ([`StateManager`])
//! - The landing page ([`LandingPage`]) with its auto-advancing carousel
//!
//! # Execution Flow
//!
//! 1. Load `Portal Data/Portal Config.yaml` (defaults + `PORTAL_*` overrides)
//! 2. Initialize logging -> logs/grievance-portal.<date>
//! 3. Open `Portal Data/Preferences.yaml` and restore the theme
//! 4. Mount the landing page and log every slide change
//! 5. On Ctrl-C, unmount and shut the runtime down

use anyhow::Result;
use grievance_portal::ui::{CarouselEvent, LandingPage};
use grievance_portal::{APP_NAME, ConfigManager, StateManager, VERSION};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;

fn main() -> Result<()> {
    let config_manager = ConfigManager::new("Portal Data")?;
    let config = config_manager.load_portal_config()?;

    let _log_guard = grievance_portal::logging::setup_logging_with_console(
        &config.logging.log_dir,
        APP_NAME,
        config.logging.debug_mode,
        config.logging.json,
        config.logging.console_output,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(2)
        .thread_name("portal-worker")
        .build()?;

    let preferences = Arc::new(config_manager.preference_store()?);
    let state_manager = StateManager::with_preferences(
        preferences,
        &config.theme.preference_key,
        config.theme.default_theme,
    );
    tracing::info!("State manager initialized");

    let mut landing = LandingPage::new(&config, state_manager.clone(), Arc::new(state_manager))?;
    landing.mount(runtime.handle());

    let mut slide_events = landing.carousel().subscribe();
    let slides = landing.carousel().slides().to_vec();

    runtime.block_on(async move {
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupt received, shutting down");
                    break;
                }
                event = slide_events.recv() => match event {
                    Ok(CarouselEvent::SlideChanged { index, source }) => {
                        tracing::info!(
                            "Slide {} ({:?}): {}",
                            index + 1,
                            source,
                            slides[index].title
                        );
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("Missed {} slide events", skipped);
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }
    });

    landing.unmount();
    runtime.shutdown_timeout(Duration::from_secs(5));

    tracing::info!("Shutdown complete");
    Ok(())
}
