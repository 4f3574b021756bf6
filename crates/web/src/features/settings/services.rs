use registration::sheets::{APPS_SCRIPT_SOURCE, is_configured};
use storage::{SettingsRepository, dto::settings::GoogleSheetSettingsResponse, error::Result};

pub async fn google_sheet(settings: &SettingsRepository) -> Result<GoogleSheetSettingsResponse> {
    let url = settings.google_sheet_url().await?;
    Ok(GoogleSheetSettingsResponse {
        configured: is_configured(url.as_deref()),
        url,
    })
}

/// Store the webhook URL and return the resulting settings
pub async fn set_google_sheet(settings: &SettingsRepository, url: &str) -> Result<GoogleSheetSettingsResponse> {
    if !url.trim().is_empty() && !is_configured(Some(url)) {
        tracing::warn!("Saved webhook URL is not a Google Apps Script URL; registrations will not be sent to it");
    }
    settings.set_google_sheet_url(url).await?;
    google_sheet(settings).await
}

pub fn apps_script() -> &'static str {
    APPS_SCRIPT_SOURCE
}
