use registration::check_in_scanned;
use storage::{SharedParticipantStore, error::Result, models::CheckInOutcome};

/// Check in the participant whose id was decoded from a scanned QR code
pub async fn check_in(store: &SharedParticipantStore, code: &str) -> Result<CheckInOutcome> {
    check_in_scanned(store, code).await
}
