use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::participant::{CheckInRequest, CheckInResponse, CheckInResult};
use validator::Validate;

use crate::{AppState, error::WebError};

use super::services;

#[utoipa::path(
    post,
    path = "/api/check-in",
    request_body = CheckInRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Checked in, or already checked in", body = CheckInResponse),
        (status = 400, description = "Empty code"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No participant with this code", body = CheckInResponse)
    ),
    tag = "check-in"
)]
pub async fn check_in(
    State(state): State<AppState>,
    Json(req): Json<CheckInRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let response = CheckInResponse::from(services::check_in(&state.store, &req.code).await?);
    let status = match response.result {
        CheckInResult::NotFound => StatusCode::NOT_FOUND,
        CheckInResult::CheckedIn | CheckInResult::AlreadyCheckedIn => StatusCode::OK,
    };

    Ok((status, Json(response)).into_response())
}
