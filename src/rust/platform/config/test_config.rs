use super::*;

#[test]
fn test_defaults_without_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load(dir.path()).unwrap();

    assert_eq!(config, AppConfig::default());
    assert_eq!(config.engine.binary, PathBuf::from("csound"));
    assert_eq!(config.timeout(), Duration::from_secs(120));
    assert_eq!(config.release_tail(), ReleaseTail::Truncate);
    assert_eq!(config.log_level().unwrap(), Some(LogLevel::Info));
}

#[test]
fn test_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(TOML_CONFIG),
        "[engine]\ntimeout_secs = 15\n\n[render]\nextend_release_tail = true\noutput_dir = \"renders\"\n",
    )
    .unwrap();

    let config = AppConfig::load(dir.path()).unwrap();
    assert_eq!(config.engine.binary, PathBuf::from("csound"));
    assert_eq!(config.timeout(), Duration::from_secs(15));
    assert_eq!(config.release_tail(), ReleaseTail::Extend);
    assert_eq!(config.render.output_dir, Some(dir.path().join("renders")));
}

#[test]
fn test_json_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(JSON_CONFIG);
    std::fs::write(
        &path,
        r#"{ "engine": { "binary": "/opt/csound/bin/csound" }, "logging": { "level": "off" } }"#,
    )
    .unwrap();

    let config = AppConfig::load(dir.path()).unwrap();
    assert_eq!(config.engine.binary, PathBuf::from("/opt/csound/bin/csound"));
    assert_eq!(config.log_level().unwrap(), None);
}

#[test]
fn test_toml_wins_over_json() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(TOML_CONFIG), "[engine]\ntimeout_secs = 3\n").unwrap();
    std::fs::write(dir.path().join(JSON_CONFIG), r#"{ "engine": { "timeout_secs": 9 } }"#).unwrap();

    assert_eq!(AppConfig::load(dir.path()).unwrap().engine.timeout_secs, 3);
}

#[test]
fn test_zero_timeout_is_raised() {
    let mut config = AppConfig::default();
    config.engine.timeout_secs = 0;
    assert_eq!(config.timeout(), Duration::from_secs(1));
}

#[test]
fn test_invalid_files_report_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(TOML_CONFIG);
    std::fs::write(&path, "[engine\n").unwrap();

    let err = AppConfig::load(dir.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("invalid TOML config"));
}

#[test]
fn test_unknown_log_level_fails() {
    let mut config = AppConfig::default();
    config.logging.level = "chatty".to_string();
    assert!(config.logger().is_err());
}
