use std::sync::Arc;
use std::time::Duration;

use axum::{Router, extract::DefaultBodyLimit};
use registration::RegistrationPipeline;
use storage::{KeyValueStore, ParticipantStore, SettingsRepository, SharedParticipantStore};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod features;
pub mod middleware;
pub mod routes;

use features::{admin, check_in, documents, participants, photos, settings};
use middleware::auth::AdminCredentials;

/// Photos travel as base64 data URLs inside JSON bodies.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        participants::handlers::register_participant,
        participants::handlers::list_participants,
        participants::handlers::get_participant,
        participants::handlers::update_status,
        participants::handlers::filter_options,
        participants::handlers::status_summary,
        documents::handlers::download_document,
        check_in::handlers::check_in,
        settings::handlers::get_google_sheet,
        settings::handlers::update_google_sheet,
        settings::handlers::apps_script,
        photos::handlers::enhance_photo,
        admin::handlers::login,
    ),
    components(
        schemas(
            storage::dto::participant::RegisterParticipantRequest,
            storage::dto::participant::UpdateStatusRequest,
            storage::dto::participant::CheckInRequest,
            storage::dto::participant::CheckInResponse,
            storage::dto::participant::CheckInResult,
            storage::dto::participant::StatusSummary,
            storage::dto::participant::FilterOptionsResponse,
            storage::dto::settings::GoogleSheetSettingsResponse,
            storage::dto::settings::UpdateGoogleSheetRequest,
            storage::dto::photo::EnhancePhotoRequest,
            storage::dto::photo::EnhancePhotoResponse,
            storage::dto::admin::LoginRequest,
            storage::dto::admin::LoginResponse,
            storage::models::ParticipantRecord,
            storage::models::Biodata,
            storage::models::DraftReview,
            storage::models::ParticipantId,
            storage::models::ParticipantStatus,
        )
    ),
    tags(
        (name = "participants", description = "Registration and participant administration"),
        (name = "check-in", description = "QR code attendance check-in"),
        (name = "settings", description = "Spreadsheet webhook settings"),
        (name = "photos", description = "Photo enhancement"),
        (name = "admin", description = "Admin login"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("Admin credential")
                        .build(),
                ),
            )
        }
    }
}

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub store: SharedParticipantStore,
    pub settings: SettingsRepository,
    pub pipeline: Arc<RegistrationPipeline>,
    pub admin: AdminCredentials,
}

impl AppState {
    /// Load the participant list and wire the shared state over one key-value store.
    pub async fn load(
        kv: Arc<dyn KeyValueStore>,
        pipeline: RegistrationPipeline,
        admin: AdminCredentials,
    ) -> storage::Result<Self> {
        let store = ParticipantStore::load(kv.clone()).await?.into_shared();
        Ok(Self {
            store,
            settings: SettingsRepository::new(kv),
            pipeline: Arc::new(pipeline),
            admin,
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .nest("/api", routes::api(state.admin.clone()))
        .merge(routes::health())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
