mod gemini_client;
mod offline;
mod prompts;

use std::sync::Arc;
use std::time::Duration;

pub use gemini_client::GeminiClient;
pub use offline::OfflineCollaborator;
pub use prompts::PromptBuilder;

use crate::error::CollaboratorError;
use crate::traits::AiCollaborator;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Connection settings for the generative-AI endpoint.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// No key means every operation uses the offline fallback.
    pub api_key: Option<String>,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub timeout: Duration,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AiConfig {
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty());
        self
    }
}

/// Pick the live client when a key is configured, the offline fallback otherwise.
pub fn collaborator_from_config(config: AiConfig) -> Result<Arc<dyn AiCollaborator>, CollaboratorError> {
    match config.api_key.clone() {
        Some(api_key) => {
            tracing::info!(
                "Using generative AI endpoint {} (text model: {}, image model: {})",
                config.base_url,
                config.text_model,
                config.image_model
            );
            Ok(Arc::new(GeminiClient::new(config, api_key)?))
        }
        None => {
            tracing::warn!("API key not set. Using offline mock responses.");
            Ok(Arc::new(OfflineCollaborator))
        }
    }
}
