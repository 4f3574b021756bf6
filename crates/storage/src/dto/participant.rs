use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Biodata, CheckInOutcome, ParticipantRecord, ParticipantStatus};

/// Request payload for registering a participant
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterParticipantRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub biodata: Biodata,

    /// Photo as a `data:image/...;base64,` URL. Required.
    pub photo: Option<String>,
}

/// Request payload for the manual status selector
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: ParticipantStatus,
}

/// Decoded QR payload submitted for check-in
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CheckInRequest {
    #[validate(length(min = 1, message = "Scanned code is empty"))]
    pub code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CheckInResult {
    CheckedIn,
    AlreadyCheckedIn,
    NotFound,
}

/// Outcome of a check-in scan
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CheckInResponse {
    pub result: CheckInResult,
    pub message: String,
    pub participant: Option<ParticipantRecord>,
}

impl From<CheckInOutcome> for CheckInResponse {
    fn from(outcome: CheckInOutcome) -> Self {
        let message = outcome.message();
        match outcome {
            CheckInOutcome::CheckedIn(record) => Self {
                result: CheckInResult::CheckedIn,
                message,
                participant: Some(record),
            },
            CheckInOutcome::AlreadyCheckedIn(record) => Self {
                result: CheckInResult::AlreadyCheckedIn,
                message,
                participant: Some(record),
            },
            CheckInOutcome::NotFound => Self {
                result: CheckInResult::NotFound,
                message,
                participant: None,
            },
        }
    }
}

/// Per-status counts shown above the dashboard grid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub total: usize,
    pub active: usize,
    pub checked_in: usize,
    pub completed: usize,
    pub dropped: usize,
}

impl StatusSummary {
    pub fn from_records(records: &[ParticipantRecord]) -> Self {
        records.iter().fold(Self::default(), |mut summary, record| {
            summary.total += 1;
            match record.status {
                ParticipantStatus::Active => summary.active += 1,
                ParticipantStatus::CheckedIn => summary.checked_in += 1,
                ParticipantStatus::Completed => summary.completed += 1,
                ParticipantStatus::Dropped => summary.dropped += 1,
            }
            summary
        })
    }
}

/// Selector options for the dashboard filters
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FilterOptionsResponse {
    pub programs: Vec<String>,
    pub statuses: Vec<String>,
}
