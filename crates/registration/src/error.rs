use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegistrationError>;

/// Failures surfaced to whoever submitted a registration.
///
/// Review and spreadsheet failures are absorbed by the pipeline and never
/// show up here.
#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Please upload a photo.")]
    MissingPhoto,

    #[error("Failed to generate QR Code. Please try again. ({0})")]
    QrGenerationFailed(String),

    #[error("Failed to generate PR draft. Please try again. ({0})")]
    DraftGenerationFailed(String),

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl From<storage::StorageError> for RegistrationError {
    fn from(error: storage::StorageError) -> Self {
        Self::Unexpected(error.to_string())
    }
}

/// Errors from the generative-AI and spreadsheet HTTP collaborators.
#[derive(Error, Debug)]
pub enum CollaboratorError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Model returned no usable content: {0}")]
    EmptyResponse(String),

    #[error("Invalid review: {0}")]
    InvalidReview(String),

    #[error("Invalid image payload: {0}")]
    InvalidImage(String),
}

#[derive(Error, Debug)]
pub enum QrError {
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid image payload: {0}")]
    InvalidPayload(String),

    #[error("No QR code found")]
    NotFound,

    #[error("QR decoding failed: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Camera unavailable: {0}")]
    CameraUnavailable(String),
}

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("Unknown document kind '{0}'; expected certificate, internship-letter or pr-draft")]
    UnknownKind(String),
}
