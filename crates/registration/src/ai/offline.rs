use storage::models::{Biodata, DraftReview};

use crate::error::CollaboratorError;
use crate::photo::PhotoPayload;
use crate::traits::AiCollaborator;

pub const OFFLINE_REVIEW_SCORE: u8 = 8;

pub const OFFLINE_REVIEW_FEEDBACK: [&str; 3] = [
    "Excellent positive tone and professional language.",
    "Clearly highlights the participant's potential.",
    "Could be slightly more concise to improve impact.",
];

/// Deterministic stand-in used when no API key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineCollaborator;

impl OfflineCollaborator {
    pub fn draft(p: &Biodata) -> String {
        format!(
            "This is a mock PR draft for {name}, a promising {audience} from {college}, studying {course}. \
Enrolled in the \"{program}\" program, {name} is passionate about agriculture and food processing. \
With goals like \"{goals}\" and hobbies such as \"{hobbies}\", they are poised to make a significant impact. \
This training will further equip them with practical skills to excel in the agro-economic sector, \
contributing to innovative startups and community growth. We look forward to their success.",
            name = p.name,
            audience = p.target_audience,
            college = p.college_name,
            course = p.course,
            program = p.program_enrolled,
            goals = p.goals,
            hobbies = p.hobbies,
        )
    }

    pub fn review() -> DraftReview {
        DraftReview {
            score: OFFLINE_REVIEW_SCORE,
            feedback: OFFLINE_REVIEW_FEEDBACK.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[async_trait::async_trait]
impl AiCollaborator for OfflineCollaborator {
    async fn generate_draft(&self, biodata: &Biodata) -> Result<String, CollaboratorError> {
        Ok(Self::draft(biodata))
    }

    async fn review_draft(&self, _draft: &str) -> Result<DraftReview, CollaboratorError> {
        Ok(Self::review())
    }

    async fn enhance_photo(&self, photo: &PhotoPayload) -> Result<PhotoPayload, CollaboratorError> {
        tracing::warn!("API key not set for photo enhancement. Returning original image.");
        Ok(photo.clone())
    }
}
