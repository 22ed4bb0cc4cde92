use axum::{Json, extract::Multipart, extract::State, http::StatusCode};
use serde::Serialize;

use qbm_auth_types::identity::Identity;
use qbm_domain::role::UserRole;

use crate::domain::repository::ImageStore;
use crate::error::GameServiceError;
use crate::handlers::require;
use crate::state::AppState;

#[derive(Serialize)]
pub struct UploadResponse {
    pub url: String,
}

// ── POST /images ─────────────────────────────────────────────────────────────

/// Multipart upload; the `image` field carries the file. Returns the stable
/// URL to reference from stage/section/game records.
pub async fn upload_image(
    identity: Identity,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), GameServiceError> {
    require(&identity, UserRole::Admin)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| GameServiceError::validation("malformed multipart body"))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let filename = field.file_name().unwrap_or("image").to_owned();
        let bytes = field
            .bytes()
            .await
            .map_err(|_| GameServiceError::validation("could not read image field"))?;
        if bytes.is_empty() {
            return Err(GameServiceError::validation("image file is empty"));
        }
        let url = state.image_store().store(&filename, &bytes).await?;
        return Ok((StatusCode::CREATED, Json(UploadResponse { url })));
    }

    Err(GameServiceError::validation("image field is required"))
}
