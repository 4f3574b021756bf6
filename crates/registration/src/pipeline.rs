use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use storage::SharedParticipantStore;
use storage::models::{Biodata, DraftReview, ParticipantId, ParticipantRecord, ParticipantStatus};

use crate::error::{RegistrationError, Result};
use crate::sheets::{DeliveryOutcome, SheetEndpoint};
use crate::traits::{AiCollaborator, QrEncoder, SheetSink};

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// A validated registration form plus the captured photo.
#[derive(Debug, Clone)]
pub struct Submission {
    pub biodata: Biodata,
    pub photo: Option<String>,
}

/// Turns a submission into a committed participant record.
///
/// Steps run strictly in order: identifier, QR code, PR draft, draft review,
/// optional spreadsheet echo, commit. QR and draft failures abort before
/// anything is stored. A failed review is replaced by the sentinel review and
/// the spreadsheet outcome is only logged. Nothing is retried.
pub struct RegistrationPipeline {
    qr: Arc<dyn QrEncoder>,
    ai: Arc<dyn AiCollaborator>,
    sheets: Arc<dyn SheetSink>,
    clock: Clock,
    last_issued_millis: Mutex<i64>,
}

impl RegistrationPipeline {
    pub fn new(qr: Arc<dyn QrEncoder>, ai: Arc<dyn AiCollaborator>, sheets: Arc<dyn SheetSink>) -> Self {
        Self {
            qr,
            ai,
            sheets,
            clock: Arc::new(Utc::now),
            last_issued_millis: Mutex::new(0),
        }
    }

    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn ai(&self) -> &Arc<dyn AiCollaborator> {
        &self.ai
    }

    pub async fn submit(
        &self,
        submission: Submission,
        sheet_url: Option<&str>,
        store: &SharedParticipantStore,
    ) -> Result<ParticipantRecord> {
        let Submission { biodata, photo } = submission;
        let photo = photo
            .filter(|p| !p.trim().is_empty())
            .ok_or(RegistrationError::MissingPhoto)?;

        let id = self.issue_id();
        tracing::info!("Registering participant {} ({})", id, biodata.name);

        let qr_code = self.qr.encode(id.as_str()).map_err(|e| {
            tracing::error!("QR generation failed for {}: {}", id, e);
            RegistrationError::QrGenerationFailed(e.to_string())
        })?;
        tracing::debug!("QR code generated for {}", id);

        let pr_draft = self.ai.generate_draft(&biodata).await.map_err(|e| {
            tracing::error!("PR draft generation failed for {}: {}", id, e);
            RegistrationError::DraftGenerationFailed(e.to_string())
        })?;
        tracing::info!("PR draft generated for {}", id);

        let pr_draft_review = self.review(&id, &pr_draft).await;

        let record = ParticipantRecord {
            id,
            photo,
            qr_code,
            biodata,
            pr_draft,
            pr_draft_review,
            status: ParticipantStatus::Active,
        };

        match SheetEndpoint::from_configured(sheet_url) {
            Some(endpoint) => match self.sheets.append(&endpoint, &record).await {
                DeliveryOutcome::Delivered => {
                    tracing::info!("Participant {} handed to the spreadsheet webhook", record.id)
                }
                DeliveryOutcome::Unknown { reason } => {
                    tracing::warn!("Failed to save {} to Google Sheets: {}", record.id, reason)
                }
            },
            None => tracing::debug!("Spreadsheet webhook not configured; keeping {} local only", record.id),
        }

        store.write().await.insert(record.clone()).await.map_err(|e| {
            tracing::error!("Failed to store participant {}: {}", record.id, e);
            RegistrationError::from(e)
        })?;

        tracing::info!("Registration of {} complete", record.id);
        Ok(record)
    }

    /// Identifiers issued by one pipeline are strictly increasing, so two
    /// submissions in the same millisecond still get distinct ids.
    fn issue_id(&self) -> ParticipantId {
        let now = (self.clock)();
        let mut last = self
            .last_issued_millis
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let millis = now.timestamp_millis().max(*last + 1);
        *last = millis;
        ParticipantId::generate(DateTime::from_timestamp_millis(millis).unwrap_or(now))
    }

    async fn review(&self, id: &ParticipantId, draft: &str) -> DraftReview {
        let review = match self.ai.review_draft(draft).await {
            Ok(review) => review,
            Err(e) => {
                tracing::warn!("Error reviewing PR draft for {}: {}", id, e);
                return DraftReview::sentinel();
            }
        };

        // Collaborators are not trusted to uphold the score and feedback rules.
        DraftReview::new(i64::from(review.score), review.feedback).unwrap_or_else(|e| {
            tracing::warn!("Discarding invalid review for {}: {}", id, e);
            DraftReview::sentinel()
        })
    }
}
