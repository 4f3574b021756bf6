use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::{
        filter::ParticipantFilter,
        participant::{FilterOptionsResponse, RegisterParticipantRequest, StatusSummary, UpdateStatusRequest},
    },
    models::ParticipantRecord,
};
use validator::Validate;

use crate::{AppState, error::WebError};

use super::services;

#[utoipa::path(
    post,
    path = "/api/participants",
    request_body = RegisterParticipantRequest,
    responses(
        (status = 201, description = "Participant registered", body = ParticipantRecord),
        (status = 400, description = "Validation error or missing photo"),
        (status = 502, description = "QR code or PR draft generation failed"),
        (status = 500, description = "Unexpected error")
    ),
    tag = "participants"
)]
pub async fn register_participant(
    State(state): State<AppState>,
    payload: Result<Json<RegisterParticipantRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(req) = payload?;
    req.biodata.validate()?;

    let record = services::register_participant(&state, req).await?;

    Ok((StatusCode::CREATED, Json(record)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/participants",
    params(ParticipantFilter),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Participants matching the filters", body = Vec<ParticipantRecord>),
        (status = 400, description = "Unknown status filter"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "participants"
)]
pub async fn list_participants(
    State(state): State<AppState>,
    Query(filter): Query<ParticipantFilter>,
) -> Result<Response, WebError> {
    let participants = services::list_participants(&state.store, &filter)
        .await
        .map_err(WebError::BadRequest)?;

    Ok(Json(participants).into_response())
}

#[utoipa::path(
    get,
    path = "/api/participants/{id}",
    params(
        ("id" = String, Path, description = "Participant id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Participant found", body = ParticipantRecord),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn get_participant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, WebError> {
    let participant = services::get_participant(&state.store, &id).await?;

    Ok(Json(participant).into_response())
}

#[utoipa::path(
    put,
    path = "/api/participants/{id}/status",
    params(
        ("id" = String, Path, description = "Participant id")
    ),
    request_body = UpdateStatusRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Status updated", body = ParticipantRecord),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Response, WebError> {
    let updated = services::update_status(&state.store, &id, req.status).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    get,
    path = "/api/participants/programs",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Program and status filter options", body = FilterOptionsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "participants"
)]
pub async fn filter_options(State(state): State<AppState>) -> Result<Response, WebError> {
    Ok(Json(services::filter_options(&state.store).await).into_response())
}

#[utoipa::path(
    get,
    path = "/api/participants/summary",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Participant counts per status", body = StatusSummary),
        (status = 401, description = "Unauthorized")
    ),
    tag = "participants"
)]
pub async fn status_summary(State(state): State<AppState>) -> Result<Response, WebError> {
    Ok(Json(services::status_summary(&state.store).await).into_response())
}
