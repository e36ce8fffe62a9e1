use crate::domain::error::AppError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const API_KEY_ENV: &str = "API_KEY";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    pub http_proxy: Option<String>,
    #[serde(default)]
    pub clear_screen: bool,
    #[serde(default = "default_enable_emoji")]
    pub enable_emoji: bool,
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpeechConfig {
    /// External recogniser; `{locale}` is substituted. Unset means no microphone support.
    pub command: Option<String>,
    #[serde(default = "default_speech_locale")]
    pub locale: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            command: None,
            locale: default_speech_locale(),
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: "WARN".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base_url: default_api_base_url(),
            theme: default_theme(),
            http_proxy: None,
            clear_screen: false,
            enable_emoji: true,
            speech: SpeechConfig::default(),
            logging: Logging::default(),
        }
    }
}

// Defaults
fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}
fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_theme() -> String {
    "default".to_string()
}
fn default_enable_emoji() -> bool {
    true
}
fn default_speech_locale() -> String {
    "en-US".to_string()
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}

/// Read the service credential once. Blank values count as absent.
pub fn read_api_key() -> Option<String> {
    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
}

pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hnai"))
}

pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|p| p.join("config.toml"))
}

/// Location of the stored preferences (`~/.config/hnai/preferences.json` on Linux)
pub fn get_preferences_path() -> PathBuf {
    get_config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("preferences.json")
}

pub fn load_config() -> Result<Config, AppError> {
    match get_config_path() {
        Some(path) if path.exists() => load_config_from(&path),
        _ => Ok(Config::default()),
    }
}

pub fn load_config_from(path: &std::path::Path) -> Result<Config, AppError> {
    let content = fs::read_to_string(path)?;
    match parse_config(&content) {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!(
                "Warning: Failed to parse config file: {}. Using defaults.",
                e
            );
            Ok(Config::default())
        }
    }
}

pub fn parse_config(content: &str) -> Result<Config, AppError> {
    Ok(toml::from_str::<Config>(content)?)
}

pub fn generate_config_sample() -> Result<(), AppError> {
    let Some(path) = get_config_path() else {
        return Err(AppError::Init(
            "Cannot determine config directory".to_string(),
        ));
    };

    if path.exists() {
        eprintln!("Config file already exists at: {}", path.display());
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let sample = Config::default();
    let toml_content = toml::to_string_pretty(&sample)
        .map_err(|e| AppError::Init(format!("Failed to serialize config: {}", e)))?;
    fs::write(&path, toml_content)
        .map_err(|e| AppError::Init(format!("Failed to write config file: {}", e)))?;
    println!("Generated config file at: {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.theme, "default");
        assert_eq!(config.speech.locale, "en-US");
        assert!(config.speech.command.is_none());
        assert_eq!(config.logging.level, "WARN");
    }

    #[test]
    fn sample_round_trips_through_toml() {
        let sample = toml::to_string_pretty(&Config::default()).unwrap();
        let parsed = parse_config(&sample).unwrap();
        assert_eq!(parsed.api_base_url, Config::default().api_base_url);
    }
}
