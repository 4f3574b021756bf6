use storage::models::{Biodata, DraftReview, ParticipantRecord};

use crate::error::{CollaboratorError, QrError};
use crate::photo::PhotoPayload;
use crate::sheets::{DeliveryOutcome, SheetEndpoint};

/// Generative-AI operations the registration flow depends on.
#[async_trait::async_trait]
pub trait AiCollaborator: Send + Sync {
    /// Free-text PR draft for the participant.
    async fn generate_draft(&self, biodata: &Biodata) -> Result<String, CollaboratorError>;

    /// Score and feedback for a draft.
    async fn review_draft(&self, draft: &str) -> Result<DraftReview, CollaboratorError>;

    /// Professional-looking version of the participant photo.
    async fn enhance_photo(&self, photo: &PhotoPayload) -> Result<PhotoPayload, CollaboratorError>;
}

/// Renders an identifier into an image payload.
pub trait QrEncoder: Send + Sync {
    fn encode(&self, data: &str) -> Result<String, QrError>;
}

/// Append-only remote log of committed records.
#[async_trait::async_trait]
pub trait SheetSink: Send + Sync {
    async fn append(&self, endpoint: &SheetEndpoint, record: &ParticipantRecord) -> DeliveryOutcome;
}
