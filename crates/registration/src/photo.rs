use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CollaboratorError;
use crate::traits::AiCollaborator;

pub const ENHANCEMENT_WARNING: &str = "Could not enhance photo, using original.";

/// Image carried as a `data:<mime>;base64,<data>` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoPayload {
    mime_type: String,
    data: String,
}

impl PhotoPayload {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(mime_type, STANDARD.encode(bytes))
    }

    /// Parse a data URL. Only `image/<subtype>` payloads with valid base64 are accepted.
    pub fn parse(data_url: &str) -> Result<Self, CollaboratorError> {
        let rest = data_url
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| CollaboratorError::InvalidImage("missing data: scheme".to_string()))?;
        let (mime_type, data) = rest
            .split_once(";base64,")
            .ok_or_else(|| CollaboratorError::InvalidImage("payload is not base64".to_string()))?;

        let subtype = mime_type.strip_prefix("image/").unwrap_or_default();
        if subtype.is_empty() || !subtype.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(CollaboratorError::InvalidImage(format!(
                "unsupported mime type '{}'",
                mime_type
            )));
        }

        STANDARD
            .decode(data)
            .map_err(|e| CollaboratorError::InvalidImage(format!("bad base64: {}", e)))?;

        Ok(Self::new(mime_type, data))
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Base64 body without the data URL header.
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn decode_bytes(&self) -> Result<Vec<u8>, CollaboratorError> {
        STANDARD
            .decode(&self.data)
            .map_err(|e| CollaboratorError::InvalidImage(format!("bad base64: {}", e)))
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

impl fmt::Display for PhotoPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_data_url())
    }
}

/// Outcome of a best-effort photo enhancement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoEnhancement {
    pub photo: String,
    pub enhanced: bool,
    pub warning: Option<String>,
}

/// Enhance a photo, falling back to the original on any failure.
pub async fn enhance_or_original(ai: &dyn AiCollaborator, photo: &str) -> PhotoEnhancement {
    let original = || PhotoEnhancement {
        photo: photo.to_string(),
        enhanced: false,
        warning: Some(ENHANCEMENT_WARNING.to_string()),
    };

    let payload = match PhotoPayload::parse(photo) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::error!("Invalid image format for enhancement: {}", e);
            return original();
        }
    };

    match ai.enhance_photo(&payload).await {
        Ok(enhanced) => {
            let changed = enhanced != payload;
            PhotoEnhancement {
                photo: enhanced.to_data_url(),
                enhanced: changed,
                warning: None,
            }
        }
        Err(e) => {
            tracing::warn!("Photo enhancement failed, keeping original: {}", e);
            original()
        }
    }
}
