use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::admin::{LoginRequest, LoginResponse};

use crate::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credential accepted", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = LoginResponse)
    ),
    tag = "admin"
)]
pub async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    let authenticated = services::login(&state.admin, &req.credential);
    let status = if authenticated {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };

    (status, Json(LoginResponse { authenticated })).into_response()
}
