use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Current spreadsheet integration settings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GoogleSheetSettingsResponse {
    pub url: Option<String>,
    /// Whether the URL is one the registration pipeline will deliver to.
    pub configured: bool,
}

/// Request payload for updating the webhook URL; an empty string clears it
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateGoogleSheetRequest {
    #[validate(length(max = 2048))]
    pub url: String,
}
