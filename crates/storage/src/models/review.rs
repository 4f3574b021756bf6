use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const SENTINEL_FEEDBACK: &str =
    "Failed to get PR draft review. Please check the content manually.";

const MAX_SCORE: i64 = 10;

/// Quality review of a generated PR draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DraftReview {
    /// Score out of 10.
    pub score: u8,
    pub feedback: Vec<String>,
}

/// Coarse grading used when presenting a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewBand {
    Good,
    Fair,
    Poor,
}

impl DraftReview {
    /// Validates a review as returned by the model.
    ///
    /// The score must lie in `0..=10` and a positive score must come with at
    /// least one feedback entry. Blank feedback lines are dropped first.
    pub fn new(score: i64, feedback: Vec<String>) -> Result<Self, String> {
        if !(0..=MAX_SCORE).contains(&score) {
            return Err(format!("review score {} is outside 0..=10", score));
        }

        let feedback: Vec<String> = feedback
            .into_iter()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        if score > 0 && feedback.is_empty() {
            return Err("review with a positive score has no feedback".to_string());
        }

        Ok(Self {
            score: score as u8,
            feedback,
        })
    }

    /// Review recorded when no review could be obtained.
    pub fn sentinel() -> Self {
        Self {
            score: 0,
            feedback: vec![SENTINEL_FEEDBACK.to_string()],
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.score == 0 && self.feedback.len() == 1 && self.feedback[0] == SENTINEL_FEEDBACK
    }

    pub fn band(&self) -> ReviewBand {
        match self.score {
            8.. => ReviewBand::Good,
            5..=7 => ReviewBand::Fair,
            _ => ReviewBand::Poor,
        }
    }
}
