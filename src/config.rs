use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::api_connection::endpoints::DEFAULT_MODEL;

pub const API_KEY_ENV_VAR: &str = "OPENROUTER_API_KEY";
pub const DATA_FILE_ENV_VAR: &str = "CHEFFY_DATA_FILE";
pub const MODEL_ENV_VAR: &str = "CHEFFY_MODEL";
pub const CHAT_TIMEOUT_ENV_VAR: &str = "CHEFFY_CHAT_TIMEOUT_SECS";
const DEFAULT_DATA_FILE: &str = "cheffy_data.json";
const DEFAULT_CHAT_TIMEOUT_SECS: u64 = 60;

/// Runtime settings gathered from the environment (after `.env` is loaded).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub api_key_env_var: String,
    pub model: String,
    pub site_url: String,
    pub app_name: String,
    pub chat_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let chat_timeout_secs = lookup(CHAT_TIMEOUT_ENV_VAR)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_CHAT_TIMEOUT_SECS);

        Self {
            data_file: lookup(DATA_FILE_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE)),
            api_key_env_var: API_KEY_ENV_VAR.to_string(),
            model: lookup(MODEL_ENV_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            site_url: lookup("SITE_URL").unwrap_or_else(|| "http://localhost:3000".to_string()),
            app_name: lookup("APP_NAME").unwrap_or_else(|| "Cheffy".to_string()),
            chat_timeout: Duration::from_secs(chat_timeout_secs),
        }
    }

    pub fn with_data_file(mut self, data_file: Option<PathBuf>) -> Self {
        if let Some(path) = data_file {
            self.data_file = path;
        }
        self
    }
}
