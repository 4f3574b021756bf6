//! Router-level tests for the registration and admin API.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use registration::{OfflineCollaborator, PngQrEncoder, RegistrationPipeline, WebhookSheetSink};
use serde_json::{Value, json};
use std::time::Duration;
use storage::{KeyValueStore, MemoryKeyValueStore};
use tower::util::ServiceExt;
use web::middleware::auth::AdminCredentials;
use web::{AppState, build_router};

const ADMIN: &str = "letmein";
const PHOTO: &str = "data:image/png;base64,aGVsbG8=";

async fn setup_app() -> (axum::Router, AppState) {
    let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryKeyValueStore::new());
    let pipeline = RegistrationPipeline::new(
        Arc::new(PngQrEncoder::default()),
        Arc::new(OfflineCollaborator),
        Arc::new(WebhookSheetSink::new(Duration::from_secs(1)).unwrap()),
    );
    let state = AppState::load(kv, pipeline, AdminCredentials::from_comma_separated(ADMIN))
        .await
        .unwrap();
    (build_router(state.clone()), state)
}

fn request(method: &str, uri: &str, body: Option<Value>, admin: bool) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if admin {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", ADMIN));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn registration(name: &str, email: &str, program: &str) -> Value {
    json!({
        "name": name,
        "address1": "12 Market Road",
        "city": "Jaipur",
        "pinCode": "302001",
        "mobile": "9000000000",
        "email": email,
        "collegeName": "Rajasthan University",
        "course": "B.Sc Agriculture",
        "goals": "Start a dairy brand",
        "hobbies": "Cooking",
        "programEnrolled": program,
        "startDate": "2025-01-06",
        "endDate": "2025-03-28",
        "targetAudience": "Student",
        "photo": PHOTO,
    })
}

async fn register(app: &axum::Router, name: &str, email: &str, program: &str) -> Value {
    let response = app
        .clone()
        .oneshot(request("POST", "/api/participants", Some(registration(name, email, program)), false))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    extract_json(response.into_body()).await
}

#[tokio::test]
async fn test_health_endpoint_no_auth_required() {
    let (app, _) = setup_app().await;

    let response = app.oneshot(request("GET", "/health", None, false)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json(response.into_body()).await["status"], "ok");
}

#[tokio::test]
async fn test_register_returns_active_record_with_offline_draft() {
    let (app, state) = setup_app().await;

    let body = register(&app, "Asha Rao", "asha@example.com", "Sales & Marketing").await;

    assert!(body["id"].as_str().unwrap().starts_with("GWP-"));
    assert_eq!(body["status"], "Active");
    assert_eq!(body["prDraftReview"]["score"], 8);
    assert!(body["prDraft"].as_str().unwrap().contains("mock PR draft for Asha Rao"));
    assert!(body["qrCode"].as_str().unwrap().starts_with("data:image/png;base64,"));
    assert_eq!(state.store.read().await.len(), 1);
}

#[tokio::test]
async fn test_register_without_photo_is_bad_request() {
    let (app, state) = setup_app().await;
    let mut body = registration("Asha Rao", "asha@example.com", "Agroeconomics");
    body["photo"] = Value::Null;

    let response = app
        .oneshot(request("POST", "/api/participants", Some(body), false))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(extract_json(response.into_body()).await["error"], "Please upload a photo.");
    assert!(state.store.read().await.is_empty());
}

#[tokio::test]
async fn test_register_validates_biodata() {
    let (app, _) = setup_app().await;
    let mut body = registration("  ", "not-an-email", "Agroeconomics");
    body["endDate"] = json!("2024-01-01");

    let response = app
        .oneshot(request("POST", "/api/participants", Some(body), false))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = extract_json(response.into_body()).await;
    assert_eq!(json["error"], "Validation failed");
    let details = json["details"].as_array().unwrap();
    assert!(details.iter().any(|d| d.as_str().unwrap().starts_with("name")));
    assert!(details.iter().any(|d| d.as_str().unwrap().starts_with("email")));
}

#[tokio::test]
async fn test_register_missing_field_is_validation_error() {
    let (app, state) = setup_app().await;
    let mut body = registration("Asha Rao", "asha@example.com", "Agroeconomics");
    body.as_object_mut().unwrap().remove("name");

    let response = app
        .clone()
        .oneshot(request("POST", "/api/participants", Some(body), false))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = extract_json(response.into_body()).await;
    assert_eq!(json["error"], "Validation failed");
    let details = json["details"].as_array().unwrap();
    assert!(details.iter().any(|d| d.as_str().unwrap().starts_with("name")));

    let malformed = Request::builder()
        .method("POST")
        .uri("/api/participants")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.oneshot(malformed).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(extract_json(response.into_body()).await["error"].is_string());
    assert!(state.store.read().await.is_empty());
}

#[tokio::test]
async fn test_admin_routes_require_credential() {
    let (app, _) = setup_app().await;

    let response = app
        .clone()
        .oneshot(request("GET", "/api/participants", None, false))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/participants/summary")
                .header(header::AUTHORIZATION, "Bearer wrong")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_matches_trimmed_credential() {
    let (app, _) = setup_app().await;

    let ok = app
        .clone()
        .oneshot(request("POST", "/api/admin/login", Some(json!({ "credential": " letmein " })), false))
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(extract_json(ok.into_body()).await["authenticated"], true);

    let denied = app
        .oneshot(request("POST", "/api/admin/login", Some(json!({ "credential": "letmein2" })), false))
        .await
        .unwrap();
    assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_filters_by_search_program_and_status() {
    let (app, _) = setup_app().await;
    register(&app, "Asha Rao", "asha@example.com", "Sales & Marketing").await;
    register(&app, "Vikram Singh", "vikram@farm.in", "Agroeconomics").await;

    let response = app
        .clone()
        .oneshot(request("GET", "/api/participants?search=FARM.IN", None, true))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let found = extract_json(response.into_body()).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["name"], "Vikram Singh");

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            "/api/participants?program=Sales%20%26%20Marketing&status=All",
            None,
            true,
        ))
        .await
        .unwrap();
    let found = extract_json(response.into_body()).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["name"], "Asha Rao");

    let response = app
        .oneshot(request("GET", "/api/participants?status=Graduated", None, true))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_programs_and_summary() {
    let (app, _) = setup_app().await;
    register(&app, "Asha Rao", "asha@example.com", "Sales & Marketing").await;
    register(&app, "Vikram Singh", "vikram@farm.in", "Agroeconomics").await;

    let response = app
        .clone()
        .oneshot(request("GET", "/api/participants/programs", None, true))
        .await
        .unwrap();
    let options = extract_json(response.into_body()).await;
    assert_eq!(options["programs"], json!(["All", "Sales & Marketing", "Agroeconomics"]));
    assert_eq!(options["statuses"][0], "All");

    let response = app
        .oneshot(request("GET", "/api/participants/summary", None, true))
        .await
        .unwrap();
    let summary = extract_json(response.into_body()).await;
    assert_eq!(summary["total"], 2);
    assert_eq!(summary["active"], 2);
    assert_eq!(summary["checkedIn"], 0);
}

#[tokio::test]
async fn test_status_update_and_missing_participant() {
    let (app, _) = setup_app().await;
    let record = register(&app, "Asha Rao", "asha@example.com", "Agroeconomics").await;
    let id = record["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/api/participants/{}/status", id),
            Some(json!({ "status": "Completed" })),
            true,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json(response.into_body()).await["status"], "Completed");

    let response = app
        .clone()
        .oneshot(request("GET", &format!("/api/participants/{}", id), None, true))
        .await
        .unwrap();
    assert_eq!(extract_json(response.into_body()).await["status"], "Completed");

    let response = app
        .oneshot(request(
            "PUT",
            "/api/participants/GWP-0000-0/status",
            Some(json!({ "status": "Dropped" })),
            true,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dropped_participant_moves_between_status_filters() {
    let (app, _) = setup_app().await;
    let record = register(&app, "Asha Rao", "asha@example.com", "Agroeconomics").await;
    let id = record["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/api/participants/{}/status", id),
            Some(json!({ "status": "Dropped" })),
            true,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(request("GET", "/api/participants?status=Dropped", None, true))
        .await
        .unwrap();
    let dropped = extract_json(response.into_body()).await;
    assert_eq!(dropped.as_array().unwrap().len(), 1);
    assert_eq!(dropped[0]["id"], id);

    let response = app
        .oneshot(request("GET", "/api/participants?status=Active", None, true))
        .await
        .unwrap();
    let active = extract_json(response.into_body()).await;
    assert!(active.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_check_in_flow() {
    let (app, state) = setup_app().await;
    let record = register(&app, "Asha Rao", "asha@example.com", "Agroeconomics").await;
    let id = record["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(request("POST", "/api/check-in", Some(json!({ "code": id })), true))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["result"], "checked_in");
    assert_eq!(body["message"], "Success! Asha Rao has been checked in.");

    let response = app
        .clone()
        .oneshot(request("POST", "/api/check-in", Some(json!({ "code": id })), true))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json(response.into_body()).await["result"], "already_checked_in");

    let response = app
        .oneshot(request("POST", "/api/check-in", Some(json!({ "code": "GWP-0000-0" })), true))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(extract_json(response.into_body()).await["result"], "not_found");

    let guard = state.store.read().await;
    assert_eq!(guard.find(&id).unwrap().status, storage::models::ParticipantStatus::CheckedIn);
}

#[tokio::test]
async fn test_google_sheet_settings() {
    let (app, _) = setup_app().await;

    let response = app
        .clone()
        .oneshot(request("GET", "/api/settings/google-sheet", None, true))
        .await
        .unwrap();
    assert_eq!(extract_json(response.into_body()).await["configured"], false);

    let url = "https://script.google.com/macros/s/abc/exec";
    let response = app
        .clone()
        .oneshot(request("PUT", "/api/settings/google-sheet", Some(json!({ "url": url })), true))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["url"], url);
    assert_eq!(body["configured"], true);

    let response = app
        .clone()
        .oneshot(request("PUT", "/api/settings/google-sheet", Some(json!({ "url": "" })), true))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert!(body["url"].is_null());
    assert_eq!(body["configured"], false);

    let response = app
        .oneshot(request("GET", "/api/settings/google-sheet/script", None, true))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8(bytes.to_vec()).unwrap().contains("doPost"));
}

#[tokio::test]
async fn test_documents_download_as_pdf() {
    let (app, _) = setup_app().await;
    let record = register(&app, "Asha Rao", "asha@example.com", "Agroeconomics").await;
    let id = record["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(request("GET", &format!("/api/participants/{}/documents/certificate", id), None, true))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Certificate_Asha_Rao.pdf\""
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/participants/{}/documents/pr-draft?text=Edited%20text", id),
            None,
            true,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(request("GET", &format!("/api/participants/{}/documents/badge", id), None, true))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(request("GET", "/api/participants/GWP-0000-0/documents/certificate", None, true))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_photo_enhance_offline_returns_original() {
    let (app, _) = setup_app().await;

    let response = app
        .oneshot(request("POST", "/api/photos/enhance", Some(json!({ "photo": PHOTO })), false))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["photo"], PHOTO);
}
