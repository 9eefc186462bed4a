pub mod preferences;

pub use preferences::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};

use crate::models::PortalConfig;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, Environment, File, FileFormat};
use std::fs;

/// Prefix for environment overrides, e.g. `PORTAL_AUTH__PASSWORD_MIN_LENGTH=6`
pub const DEFAULT_ENV_PREFIX: &str = "PORTAL";

/// Configuration manager for the portal's YAML files.
///
/// Manages two files inside one directory:
/// - Portal config (`Portal Config.yaml`): carousel timing, validation rules, theme, slides
/// - Preferences (`Preferences.yaml`): persisted user preferences such as the theme
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    portal_config_path: Utf8PathBuf,
    preferences_path: Utf8PathBuf,
    env_prefix: String,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// # Arguments
    /// * `config_dir` - Directory containing configuration files (e.g., "Portal Data")
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            portal_config_path: config_dir.join("Portal Config.yaml"),
            preferences_path: config_dir.join("Preferences.yaml"),
            config_dir,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        })
    }

    /// Use a different prefix for environment overrides.
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = prefix.to_string();
        self
    }

    /// Load the portal configuration.
    ///
    /// The YAML file (if present) is layered under environment variables named
    /// `<PREFIX>_<SECTION>__<KEY>`. Missing keys fall back to defaults.
    pub fn load_portal_config(&self) -> Result<PortalConfig> {
        let file_exists = self.portal_config_path.exists();
        if !file_exists {
            tracing::warn!(
                "Portal config file not found at {}, using defaults",
                self.portal_config_path
            );
        }

        let layered = Config::builder()
            .add_source(
                File::new(self.portal_config_path.as_str(), FileFormat::Yaml).required(false),
            )
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read portal config: {}", self.portal_config_path))?;

        let config: PortalConfig = layered
            .try_deserialize()
            .with_context(|| format!("Failed to parse portal config: {}", self.portal_config_path))?;

        if file_exists {
            tracing::info!("Loaded portal config from {}", self.portal_config_path);
        }
        Ok(config)
    }

    /// Save the portal configuration file.
    pub fn save_portal_config(&self, config: &PortalConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize portal config to YAML")?;

        fs::write(&self.portal_config_path, yaml_string).with_context(|| {
            format!("Failed to write portal config: {}", self.portal_config_path)
        })?;

        tracing::info!("Saved portal config to {}", self.portal_config_path);
        Ok(())
    }

    /// Open the on-disk preference store that lives next to the portal config.
    pub fn preference_store(&self) -> Result<FilePreferenceStore> {
        FilePreferenceStore::open(&self.preferences_path)
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn portal_config_path(&self) -> &Utf8Path {
        &self.portal_config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NameFields;
    use tempfile::TempDir;

    fn create_test_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        // Unique prefix keeps stray PORTAL_* variables out of unit tests
        let manager = ConfigManager::new(&config_path)
            .unwrap()
            .with_env_prefix("PORTAL_UNIT_TEST_UNSET");
        (manager, temp_dir)
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let (manager, _temp_dir) = create_test_config_manager();
        let config = manager.load_portal_config().unwrap();
        assert_eq!(config, PortalConfig::default());
    }

    #[test]
    fn test_load_save_portal_config() {
        let (manager, _temp_dir) = create_test_config_manager();

        let mut config = PortalConfig::default();
        config.auth.password_min_length = 6;
        config.auth.name_fields = NameFields::Single;
        config.carousel.reset_on_manual_navigation = true;
        manager.save_portal_config(&config).unwrap();

        let loaded = manager.load_portal_config().unwrap();
        assert_eq!(loaded.auth.password_min_length, 6);
        assert_eq!(loaded.auth.name_fields, NameFields::Single);
        assert!(loaded.carousel.reset_on_manual_navigation);
        assert_eq!(loaded.slides, config.slides);
    }

    #[test]
    fn test_preference_store_location() {
        let (manager, _temp_dir) = create_test_config_manager();
        let store = manager.preference_store().unwrap();
        assert_eq!(store.path(), manager.config_dir().join("Preferences.yaml"));
    }
}
