use chrono::Local;
use registration::DocumentKind;
use storage::SharedParticipantStore;

use crate::error::WebError;
use crate::features::participants::services::get_participant;

pub struct RenderedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Render a participant document. `text` replaces the stored PR draft.
pub async fn render_document(
    store: &SharedParticipantStore,
    id: &str,
    kind: &str,
    text: Option<&str>,
) -> Result<RenderedDocument, WebError> {
    let kind: DocumentKind = kind.parse()?;
    let record = get_participant(store, id).await?;

    let bytes = kind.render(&record, text, Local::now().date_naive())?;
    tracing::info!("Rendered {} for {}", kind, record.id);

    Ok(RenderedDocument {
        file_name: kind.file_name(&record),
        bytes,
    })
}
