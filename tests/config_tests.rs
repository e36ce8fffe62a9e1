//! 配置功能测试

use hnai::infrastructure::config::{load_config_from, parse_config};
use std::io::Write;

#[test]
fn test_config_toml_format() {
    let toml_content = r#"
model = "gemini-2.0-flash"
theme = "dark"
clear_screen = true
enable_emoji = false

[speech]
command = "my-stt --lang {locale}"
locale = "fr-FR"

[logging]
enable = true
path = "/tmp/test.log"
level = "DEBUG"
"#;

    let config = parse_config(toml_content).unwrap();
    assert_eq!(config.model, "gemini-2.0-flash");
    assert_eq!(config.theme, "dark");
    assert!(config.clear_screen);
    assert!(!config.enable_emoji);
    assert_eq!(config.speech.command.as_deref(), Some("my-stt --lang {locale}"));
    assert_eq!(config.speech.locale, "fr-FR");
    assert_eq!(config.logging.path.as_deref(), Some("/tmp/test.log"));
    assert_eq!(config.logging.level, "DEBUG");
    // 未写的字段使用默认值
    assert_eq!(
        config.api_base_url,
        "https://generativelanguage.googleapis.com/v1beta"
    );
    assert!(config.http_proxy.is_none());
}

#[test]
fn test_load_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "model = \"gemini-2.5-pro\"").unwrap();
    writeln!(file, "http_proxy = \"http://127.0.0.1:7890\"").unwrap();

    let config = load_config_from(file.path()).unwrap();
    assert_eq!(config.model, "gemini-2.5-pro");
    assert_eq!(config.http_proxy.as_deref(), Some("http://127.0.0.1:7890"));
    assert_eq!(config.speech.locale, "en-US");
}

#[test]
fn test_broken_config_falls_back_to_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "model = [unterminated").unwrap();

    let config = load_config_from(file.path()).unwrap();
    assert_eq!(config.model, "gemini-2.5-flash");
    assert!(config.logging.enable);
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_config_from(&dir.path().join("absent.toml")).is_err());
}
