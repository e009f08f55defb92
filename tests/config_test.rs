use distui::config::{AppConfig, ConfigManager};
use distui::OutputFormat;
use std::fs;
use tempfile::TempDir;

// Helper to create a temporary config directory for testing
fn setup_test_config_dir() -> (TempDir, ConfigManager) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_manager = ConfigManager::with_dir(temp_dir.path().to_path_buf());
    (temp_dir, config_manager)
}

#[test]
fn test_default_config() {
    let config = AppConfig::default();

    assert_eq!(config.version, "0.1");

    assert_eq!(config.display.marker, "braille");
    assert_eq!(config.display.sidebar_width, 36);
    assert!(config.display.show_key_hints);

    assert_eq!(config.output.format, "json");
    assert_eq!(config.output_format().unwrap(), OutputFormat::Json);

    assert_eq!(config.export.directory, None);
    assert_eq!(config.export.width, 640);
    assert_eq!(config.export.height, 480);

    assert_eq!(config.performance.event_poll_interval_ms, 25);

    assert_eq!(config.theme.colors.primary, "cyan");
    assert_eq!(config.theme.colors.curve, "cyan");

    assert!(!config.debug.enabled);
    assert_eq!(config.debug.log_level, "info");
}

#[test]
fn test_generate_default_config() {
    let (_temp_dir, config_manager) = setup_test_config_dir();

    let template = config_manager.generate_default_config();

    assert!(template.contains("[display]"));
    assert!(template.contains("[output]"));
    assert!(template.contains("[export]"));
    assert!(template.contains("[performance]"));
    assert!(template.contains("[theme.colors]"));
    assert!(template.contains("[debug]"));
}

#[test]
fn test_write_default_config_refuses_overwrite() {
    let (_temp_dir, config_manager) = setup_test_config_dir();

    let path = config_manager.write_default_config(false).unwrap();
    assert!(path.exists());
    assert!(config_manager.write_default_config(false).is_err());

    fs::write(&path, "version = \"0.1\"\n").unwrap();
    config_manager.write_default_config(true).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("[theme.colors]"));
}

#[test]
fn test_load_without_file_uses_defaults() {
    let (_temp_dir, config_manager) = setup_test_config_dir();
    let config = AppConfig::load_from(&config_manager).unwrap();
    assert_eq!(config.display.sidebar_width, 36);
}

#[test]
fn test_partial_user_config_merges_over_defaults() {
    let (_temp_dir, config_manager) = setup_test_config_dir();
    fs::write(
        config_manager.config_path("config.toml"),
        r##"
[display]
marker = "dot"

[output]
format = "text"

[theme.colors]
curve = "#ff8800"
"##,
    )
    .unwrap();

    let config = AppConfig::load_from(&config_manager).unwrap();
    assert_eq!(config.display.marker, "dot");
    assert_eq!(config.display.sidebar_width, 36);
    assert_eq!(config.output_format().unwrap(), OutputFormat::Text);
    assert_eq!(config.theme.colors.curve, "#ff8800");
    assert_eq!(config.theme.colors.border, "cyan");
}

#[test]
fn test_invalid_values_rejected() {
    let (_temp_dir, config_manager) = setup_test_config_dir();
    let path = config_manager.config_path("config.toml");

    for bad in [
        "[display]\nmarker = \"star\"\n",
        "[display]\nsidebar_width = 10\n",
        "[output]\nformat = \"yaml\"\n",
        "[export]\nwidth = 0\n",
        "[performance]\nevent_poll_interval_ms = 0\n",
        "[export]\nheight = 0\n",
        "version = \"0.9\"\n",
    ] {
        fs::write(&path, bad).unwrap();
        assert!(
            AppConfig::load_from(&config_manager).is_err(),
            "accepted: {}",
            bad
        );
    }
}

#[test]
fn test_malformed_toml_reports_path() {
    let (_temp_dir, config_manager) = setup_test_config_dir();
    fs::write(config_manager.config_path("config.toml"), "[display\n").unwrap();
    let err = AppConfig::load_from(&config_manager).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}
