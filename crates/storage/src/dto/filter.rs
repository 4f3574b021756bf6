use serde::Deserialize;
use utoipa::IntoParams;

use crate::models::ParticipantStatus;

/// Selector value meaning "do not filter on this field".
pub const ALL: &str = "All";

/// Dashboard filters. Absent values and `"All"` disable a filter.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ParticipantFilter {
    /// Case-insensitive substring matched against name or email.
    pub search: Option<String>,
    /// Exact program name.
    pub program: Option<String>,
    /// Exact status (`Active`, `Checked-In`, `Completed`, `Dropped`).
    pub status: Option<String>,
}

impl ParticipantFilter {
    pub fn new(
        search: impl Into<String>,
        program: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            search: Some(search.into()),
            program: Some(program.into()),
            status: Some(status.into()),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.status_filter().map(|_| ())
    }

    /// Lower-cased search term, `None` when empty. Whitespace is kept so a
    /// leading space can anchor a surname.
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    pub fn program_filter(&self) -> Option<&str> {
        self.program.as_deref().filter(|p| !p.is_empty() && *p != ALL)
    }

    pub fn status_filter(&self) -> Result<Option<ParticipantStatus>, String> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") | Some(ALL) => Ok(None),
            Some(value) => value.parse().map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_disables_filters() {
        let filter = ParticipantFilter::new("", ALL, ALL);
        assert_eq!(filter.search_term(), None);
        assert_eq!(filter.program_filter(), None);
        assert_eq!(filter.status_filter().unwrap(), None);
    }

    #[test]
    fn test_unknown_status_is_invalid() {
        let filter = ParticipantFilter {
            status: Some("Graduated".to_string()),
            ..Default::default()
        };
        assert!(filter.validate().is_err());
    }

    #[test]
    fn test_search_term_is_lowercased_but_not_trimmed() {
        let filter = ParticipantFilter {
            search: Some(" ASHA ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.search_term().as_deref(), Some(" asha "));
    }
}
