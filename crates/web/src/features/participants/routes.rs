use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::handlers::{
    filter_options, get_participant, list_participants, register_participant, status_summary, update_status,
};
use crate::AppState;
use crate::middleware::auth::{AdminCredentials, require_auth};

pub fn routes(admin: AdminCredentials) -> Router<AppState> {
    let protected = Router::new()
        .route("/", get(list_participants))
        .route("/programs", get(filter_options))
        .route("/summary", get(status_summary))
        .route("/:id", get(get_participant))
        .route("/:id/status", put(update_status))
        .route_layer(middleware::from_fn_with_state(admin, require_auth));

    Router::new()
        .route("/", post(register_participant))
        .merge(protected)
}
