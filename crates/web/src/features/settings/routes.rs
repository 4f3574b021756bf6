use axum::{Router, middleware, routing::get};

use super::handlers::{apps_script, get_google_sheet, update_google_sheet};
use crate::AppState;
use crate::middleware::auth::{AdminCredentials, require_auth};

pub fn routes(admin: AdminCredentials) -> Router<AppState> {
    Router::new()
        .route("/google-sheet", get(get_google_sheet).put(update_google_sheet))
        .route("/google-sheet/script", get(apps_script))
        .route_layer(middleware::from_fn_with_state(admin, require_auth))
}
