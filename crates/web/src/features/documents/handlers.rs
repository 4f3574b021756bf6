use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{AppState, error::WebError};

use super::services;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DocumentQuery {
    /// Edited PR text; only used for `pr-draft`.
    pub text: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/participants/{id}/documents/{kind}",
    params(
        ("id" = String, Path, description = "Participant id"),
        ("kind" = String, Path, description = "certificate, internship-letter or pr-draft"),
        DocumentQuery
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "PDF document", content_type = "application/pdf"),
        (status = 400, description = "Unknown document kind"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn download_document(
    State(state): State<AppState>,
    Path((id, kind)): Path<(String, String)>,
    Query(query): Query<DocumentQuery>,
) -> Result<Response, WebError> {
    let document = services::render_document(&state.store, &id, &kind, query.text.as_deref()).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", header_safe(&document.file_name)),
            ),
        ],
        document.bytes,
    )
        .into_response())
}

fn header_safe(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| if c.is_ascii_graphic() && c != '"' { c } else { '_' })
        .collect()
}
