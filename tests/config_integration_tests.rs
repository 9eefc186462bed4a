//! Integration tests for ConfigManager and configuration file handling
//!
//! These tests verify:
//! - Default configuration when no file exists
//! - Saving and reloading the portal config
//! - Partial files falling back to defaults
//! - Environment overrides layered over the file
//! - Configured validation rules reaching the auth form

use camino::Utf8PathBuf;
use grievance_portal::models::{Alignment, NameFields};
use grievance_portal::services::{Schema, SchemaValidator};
use grievance_portal::{AuthMode, ConfigManager, FormField, PortalConfig, Theme};
use std::fs;
use tempfile::TempDir;

fn create_test_config_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, config_path)
}

fn manager(config_path: &Utf8PathBuf, prefix: &str) -> ConfigManager {
    ConfigManager::new(config_path).unwrap().with_env_prefix(prefix)
}

#[test]
fn test_create_config_manager() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    assert_eq!(manager.config_dir(), &config_path);
    assert_eq!(
        manager.portal_config_path(),
        config_path.join("Portal Config.yaml")
    );
}

#[test]
fn test_creates_missing_directory() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let nested = config_path.join("Portal Data");

    ConfigManager::new(&nested).unwrap();
    assert!(nested.exists());
}

#[test]
fn test_load_default_portal_config() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let config = manager(&config_path, "PORTAL_IT_DEFAULTS")
        .load_portal_config()
        .unwrap();

    assert_eq!(config.carousel.interval_ms, 6500);
    assert_eq!(config.auth.password_min_length, 8);
    assert_eq!(config.auth.submit_delay_ms, 800);
    assert_eq!(config.auth.success_display_ms, 2000);
    assert_eq!(config.theme.preference_key, "theme");
    assert_eq!(config.theme.default_theme, Theme::Light);
    assert_eq!(config.slides.len(), 3);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = manager(&config_path, "PORTAL_IT_PARTIAL");

    fs::write(
        manager.portal_config_path(),
        "carousel:\n  interval_ms: 4000\ntheme:\n  default_theme: dark\n",
    )
    .unwrap();

    let config = manager.load_portal_config().unwrap();
    assert_eq!(config.carousel.interval_ms, 4000);
    assert!(!config.carousel.reset_on_manual_navigation);
    assert_eq!(config.theme.default_theme, Theme::Dark);
    assert_eq!(config.auth.password_min_length, 8);
}

#[test]
fn test_custom_slides_round_trip() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = manager(&config_path, "PORTAL_IT_SLIDES");

    let mut config = PortalConfig::default();
    config.slides.truncate(1);
    config.slides[0].title = "Only Slide".to_string();
    config.slides[0].alignment = Alignment::Right;
    manager.save_portal_config(&config).unwrap();

    let loaded = manager.load_portal_config().unwrap();
    assert_eq!(loaded.slides.len(), 1);
    assert_eq!(loaded.slides[0].title, "Only Slide");
    assert_eq!(loaded.slides[0].alignment, Alignment::Right);
}

#[test]
fn test_invalid_yaml_is_an_error() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = manager(&config_path, "PORTAL_IT_INVALID");

    fs::write(manager.portal_config_path(), "auth: [unterminated").unwrap();

    assert!(manager.load_portal_config().is_err());
}

#[test]
fn test_environment_overrides_file() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = manager(&config_path, "PORTAL_IT_ENV");

    fs::write(
        manager.portal_config_path(),
        "auth:\n  password_min_length: 10\n",
    )
    .unwrap();

    // SAFETY: the variable name is unique to this test; no other test reads it
    unsafe {
        std::env::set_var("PORTAL_IT_ENV_AUTH__PASSWORD_MIN_LENGTH", "6");
    }
    let config = manager.load_portal_config().unwrap();
    // SAFETY: as above
    unsafe {
        std::env::remove_var("PORTAL_IT_ENV_AUTH__PASSWORD_MIN_LENGTH");
    }

    assert_eq!(config.auth.password_min_length, 6);
}

#[test]
fn test_configured_rules_reach_schema() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = manager(&config_path, "PORTAL_IT_RULES");

    fs::write(
        manager.portal_config_path(),
        "auth:\n  password_min_length: 6\n  name_fields: single\n",
    )
    .unwrap();
    let config = manager.load_portal_config().unwrap();
    assert_eq!(config.auth.name_fields, NameFields::Single);

    let schema = Schema::for_mode(AuthMode::SignUp, &config.auth);
    assert!(schema.contains(FormField::Name));
    assert!(!schema.contains(FormField::FirstName));

    let sign_in = Schema::for_mode(AuthMode::SignIn, &config.auth);
    let mut values = grievance_portal::models::FormFieldValues::empty(&sign_in.fields());
    values.set(FormField::Email, "a@b.com");
    values.set(FormField::Password, "123456");
    assert!(SchemaValidator::new().validate(&sign_in, &values).is_empty());
}
