// Grievance Portal - headless UI-state core for a public grievance/feedback portal
//
// This is the library crate containing the page controllers, validation and shell state.
// The binary crate (main.rs) runs a headless landing-page session.

pub mod config;
pub mod logging;
pub mod models;
pub mod services;
pub mod state;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::{ConfigManager, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use models::{AuthMode, FormField, PortalConfig, PortalState, Route, Router, Theme};
pub use state::{StateChange, StateManager};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
