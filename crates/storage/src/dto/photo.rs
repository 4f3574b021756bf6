use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Photo to run through the image model
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct EnhancePhotoRequest {
    /// `data:image/...;base64,` URL
    #[validate(length(min = 1, message = "Please upload a photo."))]
    pub photo: String,
}

/// Enhanced photo, or the original with a warning when enhancement failed
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnhancePhotoResponse {
    pub photo: String,
    pub enhanced: bool,
    pub warning: Option<String>,
}
