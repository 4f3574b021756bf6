use registration::{AiCollaborator, enhance_or_original};
use storage::dto::photo::EnhancePhotoResponse;

pub async fn enhance_photo(ai: &dyn AiCollaborator, photo: &str) -> EnhancePhotoResponse {
    let enhancement = enhance_or_original(ai, photo).await;
    EnhancePhotoResponse {
        photo: enhancement.photo,
        enhanced: enhancement.enhanced,
        warning: enhancement.warning,
    }
}
