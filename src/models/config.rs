use crate::models::{SlideDescriptor, Theme, default_slides};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Portal configuration from `Portal Config.yaml`
///
/// Every section falls back to its defaults when absent, so a partial file
/// (or no file at all) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub carousel: CarouselSettings,
    pub auth: AuthSettings,
    pub theme: ThemeSettings,
    pub logging: LoggingSettings,
    pub slides: Vec<SlideDescriptor>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            carousel: CarouselSettings::default(),
            auth: AuthSettings::default(),
            theme: ThemeSettings::default(),
            logging: LoggingSettings::default(),
            slides: default_slides(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselSettings {
    /// Auto-advance period in milliseconds
    pub interval_ms: u64,

    /// Re-arm the auto-advance timer whenever the user navigates manually
    pub reset_on_manual_navigation: bool,
}

const DEFAULT_INTERVAL_MS: u64 = 6500;

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            reset_on_manual_navigation: false,
        }
    }
}

impl CarouselSettings {
    /// A configured period of zero is rejected in favor of the default.
    pub fn interval(&self) -> Duration {
        if self.interval_ms == 0 {
            tracing::warn!(
                "carousel.interval_ms must be positive; using {} ms",
                DEFAULT_INTERVAL_MS
            );
            return Duration::from_millis(DEFAULT_INTERVAL_MS);
        }
        Duration::from_millis(self.interval_ms)
    }
}

/// How the sign-up form asks for the user's name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameFields {
    /// `firstName` and `lastName`
    #[default]
    Split,
    /// A single `name` input
    Single,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub password_min_length: usize,
    pub name_fields: NameFields,
    pub phone_min_digits: usize,

    /// Simulated acceptance latency in milliseconds
    pub submit_delay_ms: u64,

    /// How long the success banner stays up, in milliseconds
    pub success_display_ms: u64,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            password_min_length: 8,
            name_fields: NameFields::Split,
            phone_min_digits: 10,
            submit_delay_ms: 800,
            success_display_ms: 2000,
        }
    }
}

impl AuthSettings {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn success_display(&self) -> Duration {
        Duration::from_millis(self.success_display_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    /// Preference key the theme name is stored under
    pub preference_key: String,

    /// Theme used when no preference has been stored yet
    pub default_theme: Theme,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            preference_key: "theme".to_string(),
            default_theme: Theme::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub log_dir: String,
    pub debug_mode: bool,
    pub json: bool,
    pub console_output: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            debug_mode: false,
            json: false,
            console_output: true,
        }
    }
}
