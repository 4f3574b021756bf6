use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Admin login attempt
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub credential: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub authenticated: bool,
}
