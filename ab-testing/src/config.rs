//! Environment configuration.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1556742049-0cfed4f6a45d?w=800&q=80";
pub const DEFAULT_OUTPUT_DIR: &str = "results";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings read from the environment (and `.env`, when present)
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Only required when the vision adapter is used
    pub openai_api_key: Option<String>,
    pub model: String,
    pub api_url: String,
    pub default_image_url: String,
    pub output_dir: PathBuf,
    pub image_analysis_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            default_image_url: DEFAULT_IMAGE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            image_analysis_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// True when neither `--image-url` nor `DEFAULT_IMAGE_URL` replaced the built-in image
    pub fn uses_sample_image(&self) -> bool {
        self.default_image_url == DEFAULT_IMAGE_URL
    }

    /// Load `.env` if present, then read the process environment
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars().collect())
    }

    /// Build from an explicit variable map; unset or empty variables take defaults
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let image_analysis_timeout = match get("IMAGE_ANALYSIS_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.parse::<u64>().with_context(|| {
                format!("IMAGE_ANALYSIS_TIMEOUT_SECS must be whole seconds, got '{}'", raw)
            })?),
            None => defaults.image_analysis_timeout,
        };

        Ok(Self {
            openai_api_key: get("OPENAI_API_KEY"),
            model: get("OPENAI_MODEL").unwrap_or(defaults.model),
            api_url: get("OPENAI_BASE_URL").unwrap_or(defaults.api_url),
            default_image_url: get("DEFAULT_IMAGE_URL").unwrap_or(defaults.default_image_url),
            output_dir: get("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            image_analysis_timeout,
        })
    }
}
