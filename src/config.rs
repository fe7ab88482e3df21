use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::generative::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use crate::pipeline::prediction::{DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PREDICT_URL};

/// Application-level constants
pub const APP_NAME: &str = "MedScan";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default HTTP timeout for both external services.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const ENV_PREDICT_URL: &str = "MEDSCAN_PREDICT_URL";
pub const ENV_GEMINI_URL: &str = "MEDSCAN_GEMINI_URL";
pub const ENV_GEMINI_MODEL: &str = "MEDSCAN_GEMINI_MODEL";
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "MEDSCAN_TIMEOUT_SECS";
pub const ENV_MAX_UPLOAD_BYTES: &str = "MEDSCAN_MAX_UPLOAD_BYTES";

/// Get the application data directory (~/.medscan/).
///
/// Falls back to the current directory when no home directory is known.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".medscan")
}

/// Path of the persisted last-result snapshot.
pub fn last_result_path() -> PathBuf {
    app_data_dir().join("last_result.json")
}

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "medscan=info,warn"
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

/// Runtime settings for the external services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedscanConfig {
    pub predict_url: String,
    pub gemini_base_url: String,
    pub gemini_model: String,
    /// `None` disables the generative call; guidance is then generic.
    pub gemini_api_key: Option<String>,
    pub timeout_secs: u64,
    pub max_upload_bytes: u64,
}

impl Default for MedscanConfig {
    fn default() -> Self {
        Self {
            predict_url: DEFAULT_PREDICT_URL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl MedscanConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read settings through `lookup`. Unset or blank variables keep their
    /// defaults, except URLs and the model, which must not be blank when set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = non_blank_string(&lookup, ENV_PREDICT_URL)? {
            config.predict_url = url;
        }
        if let Some(url) = non_blank_string(&lookup, ENV_GEMINI_URL)? {
            config.gemini_base_url = url;
        }
        if let Some(model) = non_blank_string(&lookup, ENV_GEMINI_MODEL)? {
            config.gemini_model = model;
        }
        config.gemini_api_key = lookup(ENV_GEMINI_API_KEY)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        if let Some(secs) = positive_number(&lookup, ENV_TIMEOUT_SECS)? {
            config.timeout_secs = secs;
        }
        if let Some(bytes) = positive_number(&lookup, ENV_MAX_UPLOAD_BYTES)? {
            config.max_upload_bytes = bytes;
        }

        Ok(config)
    }
}

fn non_blank_string<F>(lookup: &F, var: &'static str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { var }),
        Some(value) => Ok(Some(value.trim().to_string())),
    }
}

fn positive_number<F>(lookup: &F, var: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(ConfigError::InvalidNumber { var, value }),
    }
}
