use crate::middleware::auth::AdminCredentials;

pub fn login(credentials: &AdminCredentials, credential: &str) -> bool {
    let valid = credentials.is_valid(credential);
    if valid {
        tracing::info!("Admin login succeeded");
    } else {
        tracing::warn!("Admin login rejected");
    }
    valid
}
