use axum::{Router, middleware, routing::get};

use super::handlers::download_document;
use crate::AppState;
use crate::middleware::auth::{AdminCredentials, require_auth};

/// Mounted under the participants prefix.
pub fn routes(admin: AdminCredentials) -> Router<AppState> {
    Router::new()
        .route("/:id/documents/:kind", get(download_document))
        .route_layer(middleware::from_fn_with_state(admin, require_auth))
}
