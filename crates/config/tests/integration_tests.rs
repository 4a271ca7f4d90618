//! End-to-end tests for the settings lifecycle

use std::path::PathBuf;
use tempfile::TempDir;
use yamiko_config::{
    apply_env_overrides, Config, ConfigManager, ConfigSection, LogLevel, ReaderConfig,
    CONFIG_VERSION, SORT_NAMES,
};
use yamiko_core::{ReaderBackground, ReaderMode};

fn setup_test_manager() -> (TempDir, ConfigManager) {
    let _ = env_logger::builder().is_test(true).try_init();
    let temp_dir = TempDir::new().expect("temp dir");
    let manager = ConfigManager::with_directory(temp_dir.path());
    (temp_dir, manager)
}

#[test]
fn test_full_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager();

    assert!(manager.initialize()?);
    let config = manager.load()?;
    assert_eq!(config.version, CONFIG_VERSION);

    let mut modified = config.clone();
    modified.reader.default_background = ReaderBackground::White;
    modified.catalog.search_debounce_ms = 150;
    manager.save(&modified)?;

    let reloaded = manager.load()?;
    assert_eq!(reloaded.reader.default_background, ReaderBackground::White);
    assert_eq!(reloaded.catalog.search_debounce_ms, 150);

    manager.reset()?;
    assert_eq!(manager.load()?, Config::default());
    Ok(())
}

#[test]
fn test_validation_through_manager() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager();
    std::fs::write(
        manager.config_path(),
        "version = 1\n[catalog]\nitems_per_page = 999\ndefault_sort = \"random\"\n",
    )?;

    let problems = manager.validate()?;
    assert_eq!(problems.len(), 2);
    assert!(problems[0].starts_with("catalog.items_per_page"));
    Ok(())
}

#[test]
fn test_toml_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::default();
    config.app.log_level = LogLevel::Trace;
    config.reader.default_mode = ReaderMode::Horizontal;

    let text = toml::to_string_pretty(&config)?;
    assert!(text.contains("log_level = \"trace\""));
    assert!(text.contains("default_mode = \"horizontal\""));
    assert_eq!(toml::from_str::<Config>(&text)?, config);
    Ok(())
}

#[test]
fn test_load_save_is_stable() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager();
    manager.initialize()?;

    let first = manager.load()?;
    manager.save(&first)?;
    assert_eq!(manager.load()?, first);
    Ok(())
}

#[test]
fn test_merge_replaces_sections() {
    let mut base = Config::default();
    let mut overlay = Config::default();
    overlay.reader = ReaderConfig {
        show_ui: false,
        ..Default::default()
    };
    overlay.catalog.items_per_page = 60;

    base.merge(overlay);
    assert!(!base.reader.show_ui);
    assert_eq!(base.catalog.items_per_page, 60);
    assert!(base.validate().is_ok());
}

#[test]
fn test_every_sort_name_is_valid() {
    let mut config = Config::default();
    for name in SORT_NAMES {
        config.catalog.default_sort = name.to_string();
        assert!(config.catalog.validate().is_ok(), "{} rejected", name);
    }
}

#[test]
fn test_env_layer_over_file() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp_dir, manager) = setup_test_manager();
    manager.update(|config| config.catalog.items_per_page = 30)?;

    let mut config = manager.load()?;
    let errors = apply_env_overrides(&mut config, |name| match name {
        "YAMIKO_APP_DATA_DIR" => Some("library".to_string()),
        "YAMIKO_APP_SEED_DEMO_DATA" => Some("false".to_string()),
        _ => None,
    });

    assert!(errors.is_empty());
    assert_eq!(config.catalog.items_per_page, 30);
    assert!(!config.app.seed_demo_data);
    assert_eq!(
        manager.data_dir(&config),
        manager.config_dir().join(PathBuf::from("library"))
    );
    Ok(())
}
