use std::{path::PathBuf, time::Duration};

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub models: ModelConfig,
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
    pub web: WebContentConfig,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub models_dir: String,
    pub spam_model_file: String,
    pub spam_vectorizer_file: String,
    pub phishing_model_file: String,
}

impl ModelConfig {
    pub fn spam_model_path(&self) -> PathBuf {
        PathBuf::from(&self.models_dir).join(&self.spam_model_file)
    }

    pub fn spam_vectorizer_path(&self) -> PathBuf {
        PathBuf::from(&self.models_dir).join(&self.spam_vectorizer_file)
    }

    pub fn phishing_model_path(&self) -> PathBuf {
        PathBuf::from(&self.models_dir).join(&self.phishing_model_file)
    }
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone)]
pub struct WebContentConfig {
    pub fetch_timeout: Duration,
    pub max_redirects: usize,
    pub max_body_bytes: usize,
}

impl Default for WebContentConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_millis(5_000),
            max_redirects: 10,
            max_body_bytes: 2_000_000,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for environment variable {key}")]
    Invalid { key: &'static str, value: String },
}
