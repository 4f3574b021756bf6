use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::{DraftReview, ParticipantId, ParticipantStatus};

/// Categories offered by the registration form.
pub const CATEGORY_OPTIONS: &[&str] = &["SHG", "Student", "Start-up"];

/// Programs offered by the registration form.
pub const PROGRAM_OPTIONS: &[&str] = &[
    "Food Processing & Packaging",
    "Sales & Marketing",
    "Agroeconomics",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Biodata collected by the registration form.
///
/// Absent fields deserialize as empty so validation reports them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
#[validate(schema(function = "validate_program_dates", skip_on_field_errors = true))]
pub struct Biodata {
    #[validate(custom(function = "not_blank"), length(max = 255))]
    pub name: String,

    #[validate(custom(function = "not_blank"))]
    pub address1: String,
    pub address2: String,
    #[validate(custom(function = "not_blank"))]
    pub city: String,
    #[validate(custom(function = "not_blank"))]
    pub pin_code: String,
    pub native_address: String,

    #[validate(custom(function = "not_blank"), length(max = 20))]
    pub mobile: String,
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,

    #[validate(custom(function = "not_blank"))]
    pub college_name: String,
    #[validate(custom(function = "not_blank"))]
    pub course: String,
    pub referred_by: String,

    pub hobbies: String,
    pub goals: String,
    pub other: String,

    #[validate(custom(function = "not_blank"))]
    pub program_enrolled: String,
    /// ISO date, `YYYY-MM-DD`.
    #[validate(custom(function = "not_blank"))]
    pub start_date: String,
    /// ISO date, `YYYY-MM-DD`.
    #[validate(custom(function = "not_blank"))]
    pub end_date: String,
    #[validate(custom(function = "validate_category"))]
    pub target_audience: String,
}

/// A committed registration.
///
/// `qr_code` always encodes `id`; both are fixed when the record is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRecord {
    pub id: ParticipantId,
    /// Photo as a `data:` URL.
    pub photo: String,
    /// QR code PNG as a `data:` URL.
    pub qr_code: String,
    #[serde(flatten)]
    pub biodata: Biodata,
    pub pr_draft: String,
    pub pr_draft_review: DraftReview,
    #[serde(default)]
    pub status: ParticipantStatus,
}

impl ParticipantRecord {
    /// Name with whitespace replaced by underscores, as used in download file names.
    pub fn file_stem(&self) -> String {
        self.biodata
            .name
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect()
    }

    /// Single-line postal address for display.
    pub fn current_address(&self) -> String {
        let b = &self.biodata;
        let street = [b.address1.as_str(), b.address2.as_str(), b.city.as_str()]
            .into_iter()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} - {}", street, b.pin_code)
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("This field is required".into());
        return Err(err);
    }
    Ok(())
}

fn validate_category(category: &str) -> Result<(), ValidationError> {
    if CATEGORY_OPTIONS.contains(&category) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_category");
        err.message = Some(format!("Category must be one of {}", CATEGORY_OPTIONS.join(", ")).into());
        Err(err)
    }
}

fn validate_program_dates(biodata: &Biodata) -> Result<(), ValidationError> {
    let start = NaiveDate::parse_from_str(biodata.start_date.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::new("invalid_start_date"))?;
    let end = NaiveDate::parse_from_str(biodata.end_date.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::new("invalid_end_date"))?;

    if end < start {
        let mut err = ValidationError::new("end_before_start");
        err.message = Some("Program end date must not be before the start date".into());
        return Err(err);
    }

    Ok(())
}
