use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use storage::models::ParticipantRecord;

use super::{DeliveryOutcome, SheetEndpoint};
use crate::error::CollaboratorError;
use crate::traits::SheetSink;

/// Posts records to a spreadsheet web app.
///
/// The body is sent as `text/plain` so browsers and script hosts treat it as a
/// simple request; the receiver parses the JSON itself.
pub struct WebhookSheetSink {
    client: Client,
}

impl WebhookSheetSink {
    pub fn new(timeout: Duration) -> Result<Self, CollaboratorError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl SheetSink for WebhookSheetSink {
    async fn append(&self, endpoint: &SheetEndpoint, record: &ParticipantRecord) -> DeliveryOutcome {
        let body = match serde_json::to_string(record) {
            Ok(body) => body,
            Err(e) => {
                return DeliveryOutcome::Unknown {
                    reason: format!("could not serialize record: {}", e),
                };
            }
        };

        let result = self
            .client
            .post(endpoint.url())
            .header(CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body)
            .send()
            .await;

        match result {
            Ok(_) => {
                tracing::info!(
                    "Participant {} sent to Google Sheet endpoint. Check the sheet for confirmation.",
                    record.id
                );
                DeliveryOutcome::Delivered
            }
            Err(e) => DeliveryOutcome::Unknown {
                reason: format!(
                    "Failed to send participant data. Check the network connection and the Web App URL configuration. ({})",
                    e
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::HeaderMap, http::StatusCode, routing::post};
    use storage::models::{Biodata, DraftReview, ParticipantId, ParticipantStatus};
    use tokio::sync::mpsc;

    fn record() -> ParticipantRecord {
        ParticipantRecord {
            id: ParticipantId::from("GWP-2025-1"),
            photo: "data:image/png;base64,AAAA".to_string(),
            qr_code: "data:image/png;base64,BBBB".to_string(),
            biodata: Biodata {
                name: "Asha Rao".to_string(),
                ..Default::default()
            },
            pr_draft: "draft".to_string(),
            pr_draft_review: DraftReview::sentinel(),
            status: ParticipantStatus::Active,
        }
    }

    #[tokio::test]
    async fn test_posts_record_as_text_plain_json() {
        let (tx, mut rx) = mpsc::unbounded_channel::<(String, String)>();
        let router = Router::new().route(
            "/exec",
            post(move |headers: HeaderMap, body: String| {
                let tx = tx.clone();
                async move {
                    let content_type = headers
                        .get("content-type")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    tx.send((content_type, body)).unwrap();
                    // The reply is never read, even when it reports an error.
                    (StatusCode::INTERNAL_SERVER_ERROR, "{\"result\":\"error\"}")
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

        let sink = WebhookSheetSink::new(Duration::from_secs(5)).unwrap();
        let endpoint = SheetEndpoint(format!("http://{}/exec", addr));
        let outcome = sink.append(&endpoint, &record()).await;
        assert_eq!(outcome, DeliveryOutcome::Delivered);

        let (content_type, body) = rx.recv().await.unwrap();
        assert_eq!(content_type, "text/plain;charset=utf-8");
        let sent: ParticipantRecord = serde_json::from_str(&body).unwrap();
        assert_eq!(sent, record());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_unknown() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let sink = WebhookSheetSink::new(Duration::from_secs(2)).unwrap();
        let endpoint = SheetEndpoint(format!("http://{}/exec", addr));
        let outcome = sink.append(&endpoint, &record()).await;
        assert!(matches!(outcome, DeliveryOutcome::Unknown { .. }));
    }
}
