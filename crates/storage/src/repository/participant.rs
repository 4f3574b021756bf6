use std::sync::Arc;

use tokio::sync::RwLock;

use super::PARTICIPANTS_KEY;
use super::kv::KeyValueStore;
use crate::dto::filter::ParticipantFilter;
use crate::dto::participant::StatusSummary;
use crate::error::{Result, StorageError};
use crate::models::{CheckInOutcome, ParticipantRecord, ParticipantStatus};
use crate::services::filtering;

pub type SharedParticipantStore = Arc<RwLock<ParticipantStore>>;

/// Ordered collection of participant records, flushed after every mutation.
///
/// The store is the system of record. It is loaded once at startup and then
/// owned by whoever drives the application (the web state or the CLI).
pub struct ParticipantStore {
    kv: Arc<dyn KeyValueStore>,
    records: Vec<ParticipantRecord>,
}

impl ParticipantStore {
    /// Load the persisted collection. A missing key yields an empty store.
    pub async fn load(kv: Arc<dyn KeyValueStore>) -> Result<Self> {
        let records: Vec<ParticipantRecord> = match kv.get(PARTICIPANTS_KEY).await? {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)?,
            _ => Vec::new(),
        };

        tracing::info!("Loaded {} participant record(s)", records.len());

        Ok(Self { kv, records })
    }

    pub fn into_shared(self) -> SharedParticipantStore {
        Arc::new(RwLock::new(self))
    }

    pub fn records(&self) -> &[ParticipantRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&ParticipantRecord> {
        self.records.iter().find(|r| r.id == *id)
    }

    /// Append a freshly registered record.
    pub async fn insert(&mut self, record: ParticipantRecord) -> Result<()> {
        if self.find(record.id.as_str()).is_some() {
            return Err(StorageError::DuplicateId(record.id));
        }
        if record.status != ParticipantStatus::Active {
            return Err(StorageError::ConstraintViolation(format!(
                "new participant {} must start Active, got {}",
                record.id, record.status
            )));
        }

        let id = record.id.clone();
        self.records.push(record);

        if let Err(e) = self.flush().await {
            self.records.pop();
            return Err(e);
        }

        tracing::info!("Stored participant {} ({} total)", id, self.records.len());
        Ok(())
    }

    /// Set a record's status directly, as the admin status selector does.
    pub async fn set_status(
        &mut self,
        id: &str,
        status: ParticipantStatus,
    ) -> Result<ParticipantRecord> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == *id)
            .ok_or(StorageError::NotFound)?;

        let previous = self.records[index].status;
        self.records[index].status = status;

        if let Err(e) = self.flush().await {
            self.records[index].status = previous;
            return Err(e);
        }

        tracing::info!("Participant {} status {} -> {}", id, previous, status);
        Ok(self.records[index].clone())
    }

    /// Scan-driven check-in. Unknown ids and repeated scans leave the store untouched.
    pub async fn check_in(&mut self, id: &str) -> Result<CheckInOutcome> {
        let id = id.trim();
        let Some(existing) = self.find(id) else {
            tracing::warn!("Check-in for unknown participant id '{}'", id);
            return Ok(CheckInOutcome::NotFound);
        };

        if existing.status == ParticipantStatus::CheckedIn {
            tracing::info!("Participant {} is already checked in", id);
            return Ok(CheckInOutcome::AlreadyCheckedIn(existing.clone()));
        }

        let updated = self.set_status(id, ParticipantStatus::CheckedIn).await?;
        Ok(CheckInOutcome::CheckedIn(updated))
    }

    pub fn filter(&self, filter: &ParticipantFilter) -> std::result::Result<Vec<&ParticipantRecord>, String> {
        filtering::filter_participants(&self.records, filter)
    }

    pub fn program_options(&self) -> Vec<String> {
        filtering::program_options(&self.records)
    }

    pub fn summary(&self) -> StatusSummary {
        StatusSummary::from_records(&self.records)
    }

    async fn flush(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.records)?;
        self.kv.set(PARTICIPANTS_KEY, &raw).await
    }
}
