use reqwest::Client;
use serde::{Deserialize, Serialize};
use storage::models::{Biodata, DraftReview};

use super::{AiConfig, PromptBuilder};
use crate::error::CollaboratorError;
use crate::photo::PhotoPayload;
use crate::traits::AiCollaborator;

type Result<T> = std::result::Result<T, CollaboratorError>;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub data: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

impl GenerateContentResponse {
    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .into_iter()
            .flat_map(|content| content.parts.iter())
    }

    /// Concatenated text of the first candidate.
    pub fn text(&self) -> Option<String> {
        let text: String = self.parts().filter_map(|p| p.text.as_deref()).collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    /// First inline image of the first candidate.
    pub fn inline_image(&self) -> Option<&InlineData> {
        self.parts().find_map(|p| p.inline_data.as_ref())
    }
}

#[derive(Debug, Deserialize)]
struct RawReview {
    score: i64,
    #[serde(default)]
    feedback: Vec<String>,
}

/// Client for a Gemini-style `generateContent` endpoint
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    text_model: String,
    image_model: String,
}

impl GeminiClient {
    pub fn new(config: AiConfig, api_key: String) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            text_model: config.text_model,
            image_model: config.image_model,
        })
    }

    async fn generate(&self, model: &str, request: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);

        tracing::debug!("Sending generateContent request (model: {})", model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CollaboratorError::Api { status, body });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(reason) = parsed.candidates.first().and_then(|c| c.finish_reason.as_deref()) {
            tracing::debug!("Model {} finished with reason {}", model, reason);
        }

        Ok(parsed)
    }

    fn text_request(prompt: String, config: Option<GenerationConfig>) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt),
                    ..Default::default()
                }],
            }],
            generation_config: config,
        }
    }
}

#[async_trait::async_trait]
impl AiCollaborator for GeminiClient {
    async fn generate_draft(&self, biodata: &Biodata) -> Result<String> {
        let request = Self::text_request(PromptBuilder::draft_prompt(biodata), None);
        let response = self.generate(&self.text_model, &request).await.inspect_err(|e| {
            tracing::error!("Error generating PR draft: {}", e);
        })?;

        let draft = response
            .text()
            .ok_or_else(|| CollaboratorError::EmptyResponse("draft text missing".to_string()))?;

        tracing::info!("PR draft generated ({} chars)", draft.len());
        Ok(draft)
    }

    async fn review_draft(&self, draft: &str) -> Result<DraftReview> {
        let config = GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(PromptBuilder::review_schema()),
            ..Default::default()
        };
        let request = Self::text_request(PromptBuilder::review_prompt(draft), Some(config));
        let response = self.generate(&self.text_model, &request).await?;

        let text = response
            .text()
            .ok_or_else(|| CollaboratorError::EmptyResponse("review JSON missing".to_string()))?;
        let raw: RawReview = serde_json::from_str(&text)?;

        DraftReview::new(raw.score, raw.feedback).map_err(CollaboratorError::InvalidReview)
    }

    async fn enhance_photo(&self, photo: &PhotoPayload) -> Result<PhotoPayload> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        inline_data: Some(InlineData {
                            mime_type: Some(photo.mime_type().to_string()),
                            data: photo.data().to_string(),
                        }),
                        ..Default::default()
                    },
                    Part {
                        text: Some(PromptBuilder::enhance_prompt().to_string()),
                        ..Default::default()
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec!["IMAGE".to_string()]),
                ..Default::default()
            }),
        };

        let response = self.generate(&self.image_model, &request).await?;
        let image = response
            .inline_image()
            .ok_or_else(|| CollaboratorError::EmptyResponse("No image data returned from API.".to_string()))?;

        let mime_type = image.mime_type.clone().unwrap_or_else(|| "image/png".to_string());
        Ok(PhotoPayload::new(mime_type, image.data.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, extract::Path, http::StatusCode, routing::post};
    use serde_json::{Value, json};
    use std::time::Duration;

    async fn spawn_mock(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client(base_url: String) -> GeminiClient {
        let config = AiConfig {
            base_url,
            timeout: Duration::from_secs(5),
            ..Default::default()
        };
        GeminiClient::new(config, "test-key".to_string()).unwrap()
    }

    fn text_response(text: &str) -> Value {
        json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }], "role": "model" },
                "finishReason": "STOP"
            }]
        })
    }

    fn biodata() -> Biodata {
        Biodata {
            name: "Asha Rao".to_string(),
            city: "Jaipur".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_generate_draft_returns_model_text() {
        let router = Router::new().route(
            "/v1beta/models/*rest",
            post(|Path(rest): Path<String>, Json(body): Json<Value>| async move {
                assert_eq!(rest, "gemini-2.5-flash:generateContent");
                let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap().to_string();
                assert!(prompt.contains("Asha Rao"));
                assert!(body.get("generationConfig").is_none());
                Json(text_response("  Asha Rao is a rising star.  "))
            }),
        );
        let base = spawn_mock(router).await;

        let draft = client(base).generate_draft(&biodata()).await.unwrap();
        assert_eq!(draft, "Asha Rao is a rising star.");
    }

    #[tokio::test]
    async fn test_generate_draft_surfaces_api_errors() {
        let router = Router::new().route(
            "/v1beta/models/*rest",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "quota exhausted") }),
        );
        let base = spawn_mock(router).await;

        let err = client(base).generate_draft(&biodata()).await.unwrap_err();
        assert!(matches!(err, CollaboratorError::Api { status: 429, ref body } if body == "quota exhausted"));
    }

    #[tokio::test]
    async fn test_generate_draft_rejects_empty_text() {
        let router = Router::new().route(
            "/v1beta/models/*rest",
            post(|| async { Json(json!({ "candidates": [] })) }),
        );
        let base = spawn_mock(router).await;

        let err = client(base).generate_draft(&biodata()).await.unwrap_err();
        assert!(matches!(err, CollaboratorError::EmptyResponse(_)));
    }

    #[tokio::test]
    async fn test_review_requests_json_schema_and_validates() {
        let router = Router::new().route(
            "/v1beta/models/*rest",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
                assert_eq!(body["generationConfig"]["responseSchema"]["properties"]["score"]["type"], "INTEGER");
                Json(text_response(r#"{"score": 9, "feedback": ["Warm tone", "Good detail"]}"#))
            }),
        );
        let base = spawn_mock(router).await;

        let review = client(base).review_draft("draft").await.unwrap();
        assert_eq!(review.score, 9);
        assert_eq!(review.feedback, vec!["Warm tone", "Good detail"]);
    }

    #[tokio::test]
    async fn test_review_out_of_range_is_invalid() {
        let router = Router::new().route(
            "/v1beta/models/*rest",
            post(|| async { Json(text_response(r#"{"score": 42, "feedback": ["?"]}"#)) }),
        );
        let base = spawn_mock(router).await;

        let err = client(base).review_draft("draft").await.unwrap_err();
        assert!(matches!(err, CollaboratorError::InvalidReview(_)));
    }

    #[tokio::test]
    async fn test_enhance_photo_returns_inline_image() {
        let router = Router::new().route(
            "/v1beta/models/*rest",
            post(|Path(rest): Path<String>, Json(body): Json<Value>| async move {
                assert_eq!(rest, "gemini-2.5-flash-image:generateContent");
                assert_eq!(body["contents"][0]["parts"][0]["inlineData"]["mimeType"], "image/jpeg");
                assert_eq!(body["generationConfig"]["responseModalities"][0], "IMAGE");
                Json(json!({
                    "candidates": [{
                        "content": { "parts": [
                            { "text": "Here you go" },
                            { "inlineData": { "data": "d29ybGQ=" } }
                        ]}
                    }]
                }))
            }),
        );
        let base = spawn_mock(router).await;

        let photo = PhotoPayload::new("image/jpeg", "aGVsbG8=");
        let enhanced = client(base).enhance_photo(&photo).await.unwrap();
        assert_eq!(enhanced.to_data_url(), "data:image/png;base64,d29ybGQ=");
    }

    #[tokio::test]
    async fn test_enhance_photo_without_image_is_error() {
        let router = Router::new().route(
            "/v1beta/models/*rest",
            post(|| async { Json(text_response("I cannot edit photos")) }),
        );
        let base = spawn_mock(router).await;

        let photo = PhotoPayload::new("image/jpeg", "aGVsbG8=");
        assert!(client(base).enhance_photo(&photo).await.is_err());
    }
}
