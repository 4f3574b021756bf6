use axum::{Router, routing::post};

use super::handlers::enhance_photo;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/enhance", post(enhance_photo))
}
