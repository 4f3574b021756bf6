use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::WebError;

/// Rejects requests whose bearer token is not on the admin allow-list.
pub async fn require_auth(
    State(credentials): State<AdminCredentials>,
    request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match token {
        Some(token) if credentials.is_valid(token) => Ok(next.run(request).await),
        Some(_) => {
            tracing::warn!("Invalid admin credential attempt");
            Err(WebError::Unauthorized)
        }
        None => Err(WebError::Unauthorized),
    }
}

/// Admin credentials allowed to use the dashboard. No sessions are kept;
/// every protected request carries the credential.
#[derive(Clone, Default)]
pub struct AdminCredentials {
    credentials: Arc<HashSet<String>>,
}

impl AdminCredentials {
    pub fn from_comma_separated(credentials_str: &str) -> Self {
        let credentials = credentials_str
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self {
            credentials: Arc::new(credentials),
        }
    }

    pub fn is_valid(&self, credential: &str) -> bool {
        self.credentials.contains(credential.trim())
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_trimmed_match() {
        let credentials = AdminCredentials::from_comma_separated(" admin-one , admin-two,, ");

        assert!(credentials.is_valid("admin-one"));
        assert!(credentials.is_valid("  admin-two "));
        assert!(!credentials.is_valid("admin"));
        assert!(!credentials.is_valid("ADMIN-ONE"));
        assert!(!credentials.is_valid(""));
    }

    #[test]
    fn test_empty_list_accepts_nothing() {
        let credentials = AdminCredentials::from_comma_separated("");
        assert!(credentials.is_empty());
        assert!(!credentials.is_valid(""));
    }
}
