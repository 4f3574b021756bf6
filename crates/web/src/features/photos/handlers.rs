use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::dto::photo::{EnhancePhotoRequest, EnhancePhotoResponse};
use validator::Validate;

use crate::{AppState, error::WebError};

use super::services;

/// Never fails on model errors; the original photo comes back with a warning.
#[utoipa::path(
    post,
    path = "/api/photos/enhance",
    request_body = EnhancePhotoRequest,
    responses(
        (status = 200, description = "Enhanced photo, or the original with a warning", body = EnhancePhotoResponse),
        (status = 400, description = "Missing photo")
    ),
    tag = "photos"
)]
pub async fn enhance_photo(
    State(state): State<AppState>,
    Json(req): Json<EnhancePhotoRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let response = services::enhance_photo(state.pipeline.ai().as_ref(), &req.photo).await;

    Ok(Json(response).into_response())
}
