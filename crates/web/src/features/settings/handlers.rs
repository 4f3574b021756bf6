use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use storage::dto::settings::{GoogleSheetSettingsResponse, UpdateGoogleSheetRequest};
use validator::Validate;

use crate::{AppState, error::WebError};

use super::services;

#[utoipa::path(
    get,
    path = "/api/settings/google-sheet",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Current webhook settings", body = GoogleSheetSettingsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "settings"
)]
pub async fn get_google_sheet(State(state): State<AppState>) -> Result<Response, WebError> {
    Ok(Json(services::google_sheet(&state.settings).await?).into_response())
}

#[utoipa::path(
    put,
    path = "/api/settings/google-sheet",
    request_body = UpdateGoogleSheetRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Webhook URL saved; an empty URL clears it", body = GoogleSheetSettingsResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "settings"
)]
pub async fn update_google_sheet(
    State(state): State<AppState>,
    Json(req): Json<UpdateGoogleSheetRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    Ok(Json(services::set_google_sheet(&state.settings, &req.url).await?).into_response())
}

#[utoipa::path(
    get,
    path = "/api/settings/google-sheet/script",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Apps Script source for the receiving spreadsheet", body = String, content_type = "text/plain"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "settings"
)]
pub async fn apps_script() -> Response {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], services::apps_script()).into_response()
}
