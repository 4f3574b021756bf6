use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use super::ParticipantRecord;

/// Lifecycle status of a participant.
///
/// Every record starts `Active`. Administrators may move a record to any
/// status directly; only the scan-driven check-in guards against repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ParticipantStatus {
    #[default]
    Active,
    #[serde(rename = "Checked-In")]
    CheckedIn,
    Completed,
    Dropped,
}

impl ParticipantStatus {
    pub const ALL: [ParticipantStatus; 4] = [
        ParticipantStatus::Active,
        ParticipantStatus::CheckedIn,
        ParticipantStatus::Completed,
        ParticipantStatus::Dropped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::CheckedIn => "Checked-In",
            Self::Completed => "Completed",
            Self::Dropped => "Dropped",
        }
    }
}

impl fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParticipantStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "checked-in" | "checkedin" => Ok(Self::CheckedIn),
            "completed" => Ok(Self::Completed),
            "dropped" => Ok(Self::Dropped),
            _ => Err(format!(
                "unknown status '{}'; expected one of Active, Checked-In, Completed, Dropped",
                s
            )),
        }
    }
}

/// Result of a scan-driven check-in.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckInOutcome {
    /// The record moved to `Checked-In`.
    CheckedIn(ParticipantRecord),
    /// The record was already `Checked-In`; nothing changed.
    AlreadyCheckedIn(ParticipantRecord),
    /// No record carries the scanned identifier.
    NotFound,
}

impl CheckInOutcome {
    pub fn record(&self) -> Option<&ParticipantRecord> {
        match self {
            Self::CheckedIn(record) | Self::AlreadyCheckedIn(record) => Some(record),
            Self::NotFound => None,
        }
    }

    /// Notification shown to the operator after a scan.
    pub fn message(&self) -> String {
        match self {
            Self::CheckedIn(record) => {
                format!("Success! {} has been checked in.", record.biodata.name)
            }
            Self::AlreadyCheckedIn(record) => {
                format!("{} is already checked in.", record.biodata.name)
            }
            Self::NotFound => "Participant not found. The QR code may be invalid.".to_string(),
        }
    }
}
