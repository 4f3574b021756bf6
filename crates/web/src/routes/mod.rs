use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::AppState;
use crate::features::{admin, check_in, documents, participants, photos, settings};
use crate::middleware::auth::AdminCredentials;

/// Everything served under `/api`.
pub fn api(admin_credentials: AdminCredentials) -> Router<AppState> {
    Router::new()
        .nest(
            "/participants",
            participants::routes::routes(admin_credentials.clone())
                .merge(documents::routes::routes(admin_credentials.clone())),
        )
        .nest("/check-in", check_in::routes::routes(admin_credentials.clone()))
        .nest("/settings", settings::routes::routes(admin_credentials))
        .nest("/photos", photos::routes::routes())
        .nest("/admin", admin::routes::routes())
}

pub fn health() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
