use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use registration::ai::{AiConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_file: PathBuf,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_timeout: Duration,
    pub admin_credentials: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            data_file: std::env::var("DATA_FILE")
                .unwrap_or_else(|_| "./data/gems.json".to_string())
                .into(),
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            gemini_timeout: Duration::from_secs(match std::env::var("GEMINI_TIMEOUT_SECS") {
                Ok(secs) => secs.parse().context("GEMINI_TIMEOUT_SECS must be a number")?,
                Err(_) => DEFAULT_TIMEOUT_SECS,
            }),
            admin_credentials: std::env::var("ADMIN_CREDENTIALS").unwrap_or_default(),
        })
    }

    pub fn ai_config(&self) -> AiConfig {
        AiConfig {
            base_url: self.gemini_base_url.clone(),
            timeout: self.gemini_timeout,
            ..AiConfig::default()
        }
        .with_api_key(self.gemini_api_key.clone())
    }
}
