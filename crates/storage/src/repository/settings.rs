use std::sync::Arc;

use super::GOOGLE_SHEET_URL_KEY;
use super::kv::KeyValueStore;
use crate::error::Result;

/// Administrator-managed settings persisted next to the participant list.
#[derive(Clone)]
pub struct SettingsRepository {
    kv: Arc<dyn KeyValueStore>,
}

impl SettingsRepository {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Configured spreadsheet webhook URL, if any.
    pub async fn google_sheet_url(&self) -> Result<Option<String>> {
        Ok(self
            .kv
            .get(GOOGLE_SHEET_URL_KEY)
            .await?
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty()))
    }

    /// Store the webhook URL; an empty string clears it.
    pub async fn set_google_sheet_url(&self, url: &str) -> Result<()> {
        self.kv.set(GOOGLE_SHEET_URL_KEY, url.trim()).await?;
        tracing::info!(
            "Google Sheet webhook URL {}",
            if url.trim().is_empty() { "cleared" } else { "updated" }
        );
        Ok(())
    }
}
