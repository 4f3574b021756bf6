use axum::{Router, middleware, routing::post};

use super::handlers::check_in;
use crate::AppState;
use crate::middleware::auth::{AdminCredentials, require_auth};

pub fn routes(admin: AdminCredentials) -> Router<AppState> {
    Router::new()
        .route("/", post(check_in))
        .route_layer(middleware::from_fn_with_state(admin, require_auth))
}
