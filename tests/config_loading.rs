use std::path::PathBuf;
use std::time::Duration;

use epg_merger::config::Config;
use epg_merger::errors::AppError;

#[test]
fn test_missing_file_writes_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let config = Config::load_from_file(&path).unwrap();

    assert!(path.exists());
    assert!(config.validate().is_ok());

    // The freshly written file loads back to the same settings
    let reloaded = Config::load_from_file(&path).unwrap();
    assert_eq!(reloaded.sources, config.sources);
    assert_eq!(reloaded.output_path, config.output_path);
}

#[test]
fn test_full_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("epg.toml");
    std::fs::write(
        &path,
        r#"
output_path = "/srv/epg/epg_all.xml"
generator_name = "My Guide"

[http]
timeout = "45s"
user_agent = "custom-agent/1.0"

[publish]
enabled = true
repository = "/srv/epg"
branch = "gh-pages"
commit_message_prefix = "Actualizar EPG"
raw_url_base = "https://raw.githubusercontent.com/owner/repo/main"
timeout = 90

[[sources]]
url = "https://epgshare01.online/epgshare01/epg_ripper_AR1.xml.gz"
target_offset = "-0600"
channels = ["Canal.Warner.TV.(Argentina).ar", "Canal.Sony.(Argentina).ar"]
name = "argentina"

[[sources]]
url = "https://www.open-epg.com/files/peru1.xml.gz"
target_offset = "+0000"
"#,
    )
    .unwrap();

    let config = Config::load_from_file(&path).unwrap();
    config.validate().unwrap();

    assert_eq!(config.output_path, PathBuf::from("/srv/epg/epg_all.xml"));
    assert_eq!(config.generator_name, "My Guide");
    assert_eq!(config.http.timeout, Duration::from_secs(45));
    assert_eq!(config.http.user_agent, "custom-agent/1.0");

    assert!(config.publish.enabled);
    assert_eq!(config.publish.remote, "origin");
    assert_eq!(config.publish.branch, "gh-pages");
    assert_eq!(config.publish.timeout, Duration::from_secs(90));

    assert_eq!(config.sources.len(), 2);
    assert_eq!(config.sources[0].display_name(), "argentina");
    assert_eq!(config.sources[0].channels.len(), 2);
    assert!(config.sources[1].channels.is_empty());
}

#[test]
fn test_invalid_toml_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "output_path = [not toml").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, AppError::Configuration { .. }));
}

#[test]
fn test_bad_offset_fails_validation() {
    let config = Config::from_toml_str(
        r#"
[[sources]]
url = "https://example.com/epg.xml.gz"
target_offset = "-6"
"#,
    )
    .unwrap();

    assert!(matches!(
        config.validate(),
        Err(AppError::Configuration { .. })
    ));
}
