use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Program prefix shared by every generated identifier.
pub const ID_PREFIX: &str = "GWP";

/// Participant identifier in the form `GWP-<year>-<unix millis>`.
///
/// Two registrations generated in the same millisecond would collide. The
/// registration pipeline issues strictly increasing timestamps, and the store
/// rejects a duplicate on insert instead of overwriting the earlier record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Builds the identifier for a registration submitted at `now`.
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use storage::models::ParticipantId;
    ///
    /// let now = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
    /// let id = ParticipantId::generate(now);
    /// assert_eq!(id.as_str(), format!("GWP-2025-{}", now.timestamp_millis()));
    /// ```
    pub fn generate(now: DateTime<Utc>) -> Self {
        Self(format!("{}-{}-{}", ID_PREFIX, now.year(), now.timestamp_millis()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ParticipantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ParticipantId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl PartialEq<str> for ParticipantId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generate_uses_prefix_year_and_millis() {
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        let id = ParticipantId::generate(now);

        assert_eq!(id.as_str(), "GWP-2024-1735689599000");
    }

    #[test]
    fn test_same_instant_yields_same_id() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(ParticipantId::generate(now), ParticipantId::generate(now));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = ParticipantId::from("GWP-2025-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"GWP-2025-1\"");
    }
}
