//! Printable documents for a participant.

mod layout;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use storage::models::ParticipantRecord;

use crate::error::DocumentError;
use layout::{Canvas, Face, Orientation};

pub use layout::wrap_text;

pub const PROGRAM_HEADER: &str = "GWellth Skill Training Program";

pub type Result<T> = std::result::Result<T, DocumentError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Certificate,
    InternshipLetter,
    PrDraft,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [Self::Certificate, Self::InternshipLetter, Self::PrDraft];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Certificate => "certificate",
            Self::InternshipLetter => "internship-letter",
            Self::PrDraft => "pr-draft",
        }
    }

    pub fn file_name(&self, record: &ParticipantRecord) -> String {
        let prefix = match self {
            Self::Certificate => "Certificate",
            Self::InternshipLetter => "Intern_Letter",
            Self::PrDraft => "PR_Draft",
        };
        format!("{}_{}.pdf", prefix, record.file_stem())
    }

    /// Render this document. `pr_text` overrides the stored draft for
    /// [`DocumentKind::PrDraft`] and is ignored otherwise.
    pub fn render(&self, record: &ParticipantRecord, pr_text: Option<&str>, today: NaiveDate) -> Result<Vec<u8>> {
        match self {
            Self::Certificate => certificate_pdf(record),
            Self::InternshipLetter => internship_letter_pdf(record, today),
            Self::PrDraft => pr_draft_pdf(record, pr_text.unwrap_or(&record.pr_draft)),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = DocumentError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "certificate" => Ok(Self::Certificate),
            "internship-letter" | "intern-letter" | "letter" => Ok(Self::InternshipLetter),
            "pr-draft" | "pr" => Ok(Self::PrDraft),
            _ => Err(DocumentError::UnknownKind(s.to_string())),
        }
    }
}

fn header(canvas: &Canvas, title: &str) {
    let mid = canvas.width() / 2.0;
    canvas.centered(PROGRAM_HEADER, 22.0, Face::Bold, mid, 20.0);
    canvas.centered(title, 16.0, Face::Regular, mid, 35.0);
    canvas.line(20.0, 45.0, canvas.width() - 20.0, 45.0, 0.5);
}

/// Landscape certificate of completion.
pub fn certificate_pdf(record: &ParticipantRecord) -> Result<Vec<u8>> {
    let b = &record.biodata;
    let canvas = Canvas::new(&format!("Certificate - {}", b.name), Orientation::Landscape)?;
    let (w, h) = (canvas.width(), canvas.height());
    let mid = w / 2.0;

    canvas.rect(5.0, 5.0, w - 10.0, h - 10.0, 1.5);

    canvas.centered("GWellth", 32.0, Face::TimesBold, mid, 30.0);
    canvas.centered("Skill Training Program", 16.0, Face::TimesRegular, mid, 40.0);
    canvas.centered("Certificate of Completion", 28.0, Face::Bold, mid, 65.0);
    canvas.centered("This is to certify that", 16.0, Face::Bold, mid, 85.0);
    canvas.centered(&b.name, 24.0, Face::TimesBoldItalic, mid, 105.0);
    canvas.centered(
        "has successfully completed the skill training program in",
        16.0,
        Face::Regular,
        mid,
        120.0,
    );
    canvas.centered(&b.program_enrolled, 20.0, Face::Bold, mid, 135.0);
    canvas.centered(
        &format!("from {} to {}", b.start_date, b.end_date),
        14.0,
        Face::Bold,
        mid,
        145.0,
    );

    let signature_y = 180.0;
    canvas.line(40.0, signature_y, 120.0, signature_y, 0.5);
    canvas.line(w - 120.0, signature_y, w - 40.0, signature_y, 0.5);
    canvas.centered("Program Coordinator", 14.0, Face::Bold, 80.0, signature_y + 5.0);
    canvas.centered("HR Manager", 14.0, Face::Bold, w - 80.0, signature_y + 5.0);

    canvas.finish()
}

/// Portrait internship offer letter dated `date`.
pub fn internship_letter_pdf(record: &ParticipantRecord, date: NaiveDate) -> Result<Vec<u8>> {
    let b = &record.biodata;
    let mut canvas = Canvas::new(&format!("Internship Offer Letter - {}", b.name), Orientation::Portrait)?;
    header(&canvas, "Internship Offer Letter");

    canvas.text(&format!("Date: {}", date.format("%d/%m/%Y")), 12.0, Face::Regular, 150.0, 60.0);

    canvas.text("To,", 12.0, Face::Bold, 20.0, 70.0);
    canvas.text(&b.name, 12.0, Face::Bold, 20.0, 75.0);
    canvas.text(&b.address1, 12.0, Face::Bold, 20.0, 80.0);
    canvas.text(&b.city, 12.0, Face::Bold, 20.0, 85.0);

    canvas.text(&format!("Dear {},", b.name), 12.0, Face::Regular, 20.0, 100.0);

    let body = format!(
        "We are pleased to offer you an internship position at GWellth as part of our Skill Training Program. \
Your internship will focus on \"{program}\".\n\n\
This opportunity is designed to provide you with hands-on experience in the field of food processing and agriculture. \
Your internship is scheduled to begin on {start} and will conclude on {end}.\n\n\
We are confident that you will make a significant contribution to our team and are excited to welcome you.\n\n\
Sincerely,",
        program = b.program_enrolled,
        start = b.start_date,
        end = b.end_date,
    );
    let y = canvas.paragraph(&body, 12.0, Face::Regular, 20.0, 110.0);
    canvas.text("The GWellth Team", 12.0, Face::Regular, 20.0, y.max(180.0));

    canvas.finish()
}

/// Portrait PR draft using `text`, which may differ from the stored draft.
pub fn pr_draft_pdf(record: &ParticipantRecord, text: &str) -> Result<Vec<u8>> {
    let name = &record.biodata.name;
    let mut canvas = Canvas::new(&format!("PR Draft - {}", name), Orientation::Portrait)?;
    header(&canvas, "Public Relations Draft");

    canvas.text(&format!("Participant: {}", name), 14.0, Face::Bold, 20.0, 60.0);
    canvas.paragraph(text, 12.0, Face::Regular, 20.0, 75.0);

    canvas.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::models::{Biodata, DraftReview, ParticipantStatus};

    fn record() -> ParticipantRecord {
        ParticipantRecord {
            id: "GWP-2025-1".into(),
            photo: "data:image/png;base64,AA==".to_string(),
            qr_code: "data:image/png;base64,AA==".to_string(),
            biodata: Biodata {
                name: "Meera  K Nair".to_string(),
                address1: "4 Lake View".to_string(),
                city: "Kochi".to_string(),
                program_enrolled: "Agroeconomics".to_string(),
                start_date: "2025-01-06".to_string(),
                end_date: "2025-03-28".to_string(),
                ..Default::default()
            },
            pr_draft: "Meera joins the program.".to_string(),
            pr_draft_review: DraftReview::sentinel(),
            status: ParticipantStatus::Completed,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 28).unwrap()
    }

    #[test]
    fn test_file_names() {
        let r = record();
        assert_eq!(DocumentKind::Certificate.file_name(&r), "Certificate_Meera__K_Nair.pdf");
        assert_eq!(DocumentKind::InternshipLetter.file_name(&r), "Intern_Letter_Meera__K_Nair.pdf");
        assert_eq!(DocumentKind::PrDraft.file_name(&r), "PR_Draft_Meera__K_Nair.pdf");
    }

    #[test]
    fn test_kind_parsing() {
        for kind in DocumentKind::ALL {
            assert_eq!(kind.as_str().parse::<DocumentKind>().unwrap(), kind);
        }
        assert_eq!("Internship_Letter".parse::<DocumentKind>().unwrap(), DocumentKind::InternshipLetter);
        assert!(matches!(
            "badge".parse::<DocumentKind>(),
            Err(DocumentError::UnknownKind(k)) if k == "badge"
        ));
    }

    #[test]
    fn test_every_kind_renders_pdf() {
        let r = record();
        for kind in DocumentKind::ALL {
            let bytes = kind.render(&r, None, today()).unwrap();
            assert!(bytes.starts_with(b"%PDF"), "{} did not render a PDF", kind);
        }
    }

    #[test]
    fn test_pr_draft_accepts_edited_text() {
        let bytes = pr_draft_pdf(&record(), &"Edited announcement. ".repeat(300)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
