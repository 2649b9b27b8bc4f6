use std::{env, str::FromStr, time::Duration};

use super::env::{
    AppConfig, ConfigError, DirectoryConfig, LoggingConfig, ModelConfig, WebContentConfig,
};

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let models = ModelConfig {
            models_dir: string_or("MODELS_DIR", "models"),
            spam_model_file: string_or("SPAM_MODEL_FILE", "spam_model.json"),
            spam_vectorizer_file: string_or("SPAM_VECTORIZER_FILE", "spam_vectorizer.json"),
            phishing_model_file: string_or("PHISHING_MODEL_FILE", "phishing_model.json"),
        };

        let directories = DirectoryConfig {
            logs_dir: string_or("LOGS_DIR", "logs"),
        };

        let logging = LoggingConfig {
            level: string_or("LOG_LEVEL", "info"),
        };

        let defaults = WebContentConfig::default();
        let web = WebContentConfig {
            fetch_timeout: parse_or::<u64>("WEBPAGE_FETCH_TIMEOUT")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.fetch_timeout),
            max_redirects: parse_or("WEBPAGE_MAX_REDIRECTS")?.unwrap_or(defaults.max_redirects),
            max_body_bytes: parse_or("WEBPAGE_MAX_BODY_BYTES")?
                .unwrap_or(defaults.max_body_bytes),
        };

        Ok(Self {
            models,
            directories,
            logging,
            web,
        })
    }
}

fn string_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_or<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
        _ => Ok(None),
    }
}
