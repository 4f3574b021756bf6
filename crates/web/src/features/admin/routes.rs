use axum::{Router, routing::post};

use super::handlers::login;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}
