use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use openai_client::DEFAULT_BASE_URL;

/// Models run when `ARGMAP_MODELS` is unset.
pub const DEFAULT_MODELS: &[&str] = &["llama3.1", "llama3.2", "gemma2"];

/// Courtesy pause between engine-heavy runs when `ARGMAP_CALL_DELAY_MS` is unset.
pub const DEFAULT_CALL_DELAY_MS: u64 = 1000;

/// Driver configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    pub api_key: Option<String>,
    pub models: Vec<String>,
    pub call_delay: Duration,
    pub max_retries: Option<u32>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            base_url: var("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: var("OPENAI_API_KEY"),
            models: var("ARGMAP_MODELS")
                .map(|v| parse_models(&v))
                .unwrap_or_else(|| DEFAULT_MODELS.iter().map(|m| m.to_string()).collect()),
            call_delay: Duration::from_millis(
                var("ARGMAP_CALL_DELAY_MS")
                    .map(|v| v.trim().parse())
                    .transpose()
                    .context("ARGMAP_CALL_DELAY_MS must be a number of milliseconds")?
                    .unwrap_or(DEFAULT_CALL_DELAY_MS),
            ),
            max_retries: var("ARGMAP_MAX_RETRIES")
                .map(|v| v.trim().parse())
                .transpose()
                .context("ARGMAP_MAX_RETRIES must be a non-negative number")?,
        })
    }
}

/// Split a comma-separated model list, dropping blanks.
pub fn parse_models(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}
