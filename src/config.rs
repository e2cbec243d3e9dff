use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CURSOR_LINGER_MS, DEFAULT_ENDPOINT,
    DEFAULT_WORD_DELAY_MS, MAX_DELAY_MS,
};
use crate::errors::{ChatError, ChatResult};
use crate::locale::Locale;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub locale: Locale,
    pub animate_replies: bool,
    pub word_delay_ms: u64,
    pub cursor_linger_ms: u64,
    pub show_thinking_indicator: bool,
    /// Empty means the locale's built-in suggestions.
    pub suggestions: Vec<String>,
    pub plain: bool,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            locale: Locale::default(),
            animate_replies: true,
            word_delay_ms: DEFAULT_WORD_DELAY_MS,
            cursor_linger_ms: DEFAULT_CURSOR_LINGER_MS,
            show_thinking_indicator: true,
            suggestions: Vec::new(),
            plain: false,
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    /// Loads the config from `~/.config/qa-chat/config.json`, creating it
    /// with defaults when missing, then applies environment overrides.
    pub fn load() -> ChatResult<Self> {
        let path = get_config_path()?;
        let mut config = load_from(&path)?;
        apply_env_overrides(&mut config, |key| env::var(key).ok())?;
        validate_config(&config)?;
        Ok(config)
    }

    pub fn log_dir(&self) -> ChatResult<PathBuf> {
        match &self.log_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(get_app_dir()?.join("logs")),
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        if self.suggestions.is_empty() {
            self.locale
                .strings()
                .suggestions
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            self.suggestions.clone()
        }
    }
}

/// Reads and validates the config at `path`, writing a default one first if
/// the file does not exist yet.
pub fn load_from(path: &Path) -> ChatResult<Config> {
    if path.exists() {
        let config_str = fs::read_to_string(path).map_err(|e| {
            ChatError::config_error(format!("Failed to read config file: {}", e))
        })?;

        let config: Config = serde_json::from_str(&config_str)
            .map_err(|e| ChatError::config_error(format!("Failed to parse config: {}", e)))?;

        validate_config(&config)?;
        Ok(config)
    } else {
        let config = Config::default();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ChatError::config_error(format!("Failed to create config directory: {}", e))
            })?;
        }

        let config_str = serde_json::to_string_pretty(&config).map_err(|e| {
            ChatError::config_error(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, config_str).map_err(|e| {
            ChatError::config_error(format!("Failed to write config file: {}", e))
        })?;

        Ok(config)
    }
}

/// Overrides file values with `QA_CHAT_*` variables found through `lookup`.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> ChatResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(endpoint) = lookup("QA_CHAT_ENDPOINT") {
        config.endpoint = endpoint;
    }

    if let Some(locale) = lookup("QA_CHAT_LOCALE") {
        config.locale = locale.parse().map_err(ChatError::config_error)?;
    }

    if let Some(level) = lookup("QA_CHAT_LOG_LEVEL") {
        config.log_level = level;
    }

    if let Some(animate) = lookup("QA_CHAT_ANIMATE") {
        config.animate_replies = match animate.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            other => {
                return Err(ChatError::config_error(format!(
                    "QA_CHAT_ANIMATE must be true or false, got '{}'",
                    other
                )))
            }
        };
    }

    Ok(())
}

fn get_app_dir() -> ChatResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| ChatError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join(APP_DIR_NAME))
}

fn get_config_path() -> ChatResult<PathBuf> {
    Ok(get_app_dir()?.join(CONFIG_FILE_NAME))
}

pub fn validate_config(config: &Config) -> ChatResult<()> {
    // Endpoint must be an absolute http(s) URL
    let url = Url::parse(&config.endpoint).map_err(|e| {
        ChatError::config_error(format!("Invalid endpoint '{}': {}", config.endpoint, e))
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ChatError::config_error(format!(
            "Endpoint must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.log_level.trim().is_empty() {
        return Err(ChatError::config_error("log_level is required"));
    }

    if config.word_delay_ms > MAX_DELAY_MS {
        return Err(ChatError::config_error(format!(
            "word_delay_ms must be at most {}",
            MAX_DELAY_MS
        )));
    }

    if config.cursor_linger_ms > MAX_DELAY_MS {
        return Err(ChatError::config_error(format!(
            "cursor_linger_ms must be at most {}",
            MAX_DELAY_MS
        )));
    }

    if config.suggestions.iter().any(|s| s.trim().is_empty()) {
        return Err(ChatError::config_error("suggestions must not be blank"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_validate_config_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_invalid_endpoint() {
        let mut config = Config::default();
        config.endpoint = "not a url".to_string();
        assert!(validate_config(&config).is_err());

        config.endpoint = "ftp://example.com/rag".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_invalid_delay() {
        let mut config = Config::default();
        config.word_delay_ms = MAX_DELAY_MS + 1;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let reloaded = load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_load_from_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"endpoint": "https://qa.example.com/rag", "locale": "vi"}"#,
        )
        .unwrap();

        let config = load_from(&path).unwrap();
        assert_eq!(config.endpoint, "https://qa.example.com/rag");
        assert_eq!(config.locale, Locale::Vi);
        assert_eq!(config.word_delay_ms, DEFAULT_WORD_DELAY_MS);
        assert!(config.animate_replies);
    }

    #[test]
    fn test_load_from_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ nope").unwrap();
        assert!(matches!(load_from(&path), Err(ChatError::Config(_))));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("QA_CHAT_ENDPOINT", "https://override.example.com/rag"),
            ("QA_CHAT_LOCALE", "vi"),
            ("QA_CHAT_ANIMATE", "0"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        apply_env_overrides(&mut config, |k| vars.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(config.endpoint, "https://override.example.com/rag");
        assert_eq!(config.locale, Locale::Vi);
        assert!(!config.animate_replies);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_env_override_rejects_bad_bool() {
        let mut config = Config::default();
        let result = apply_env_overrides(&mut config, |k| {
            (k == "QA_CHAT_ANIMATE").then(|| "maybe".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_suggestions_fall_back_to_locale() {
        let mut config = Config::default();
        config.locale = Locale::Vi;
        assert_eq!(config.suggestions().len(), Locale::Vi.strings().suggestions.len());

        config.suggestions = vec!["Custom?".to_string()];
        assert_eq!(config.suggestions(), vec!["Custom?".to_string()]);
    }
}
