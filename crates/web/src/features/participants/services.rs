use registration::Submission;
use storage::{
    SharedParticipantStore,
    dto::{
        filter::ParticipantFilter,
        participant::{FilterOptionsResponse, RegisterParticipantRequest, StatusSummary},
    },
    error::{Result, StorageError},
    models::{ParticipantRecord, ParticipantStatus},
    services::filtering::status_options,
};

use crate::AppState;

/// Run the registration pipeline against the configured spreadsheet URL
pub async fn register_participant(
    state: &AppState,
    request: RegisterParticipantRequest,
) -> registration::Result<ParticipantRecord> {
    let sheet_url = state.settings.google_sheet_url().await?;
    let submission = Submission {
        biodata: request.biodata,
        photo: request.photo,
    };

    state
        .pipeline
        .submit(submission, sheet_url.as_deref(), &state.store)
        .await
}

/// Filtered participants in registration order
pub async fn list_participants(
    store: &SharedParticipantStore,
    filter: &ParticipantFilter,
) -> std::result::Result<Vec<ParticipantRecord>, String> {
    let store = store.read().await;
    Ok(store.filter(filter)?.into_iter().cloned().collect())
}

pub async fn get_participant(store: &SharedParticipantStore, id: &str) -> Result<ParticipantRecord> {
    store.read().await.find(id).cloned().ok_or(StorageError::NotFound)
}

pub async fn update_status(
    store: &SharedParticipantStore,
    id: &str,
    status: ParticipantStatus,
) -> Result<ParticipantRecord> {
    store.write().await.set_status(id, status).await
}

pub async fn filter_options(store: &SharedParticipantStore) -> FilterOptionsResponse {
    FilterOptionsResponse {
        programs: store.read().await.program_options(),
        statuses: status_options(),
    }
}

pub async fn status_summary(store: &SharedParticipantStore) -> StatusSummary {
    store.read().await.summary()
}
