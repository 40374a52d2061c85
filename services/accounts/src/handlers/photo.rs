use axum::Json;
use axum::extract::{Multipart, State};
use bytes::Bytes;
use serde::Serialize;

use accounts_auth::identity::Identity;

use crate::error::AccountsServiceError;
use crate::state::AppState;
use crate::usecase::photo::{REGISTRATION_BUCKET, ReplacePhotoUseCase, StorePhotoUseCase};

#[derive(Serialize)]
pub struct PhotoResponse {
    pub reference: String,
}

/// A photo upload read out of a multipart body.
struct PhotoUpload {
    filename: String,
    data: Bytes,
    bucket: Option<String>,
}

/// Read the first file field (plus an optional `bucket` text field) from the
/// multipart body. A body without any file field is invalid.
async fn read_photo_upload(
    mut multipart: Multipart,
) -> Result<PhotoUpload, AccountsServiceError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut bucket = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AccountsServiceError::InvalidMultipart)?
    {
        if let Some(filename) = field.file_name() {
            let filename = filename.to_owned();
            let data = field
                .bytes()
                .await
                .map_err(|_| AccountsServiceError::InvalidMultipart)?;
            if file.is_none() {
                file = Some((filename, data));
            }
        } else if field.name() == Some("bucket") {
            bucket = Some(
                field
                    .text()
                    .await
                    .map_err(|_| AccountsServiceError::InvalidMultipart)?,
            );
        }
    }
    let (filename, data) = file.ok_or(AccountsServiceError::InvalidMultipart)?;
    Ok(PhotoUpload {
        filename,
        data,
        bucket,
    })
}

// ── POST /users/photo ────────────────────────────────────────────────────────

/// Registration-time upload. Requires a valid token like every other
/// operation; the original's anonymous variant of this endpoint is gone.
pub async fn upload_photo(
    _identity: Identity,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PhotoResponse>, AccountsServiceError> {
    let upload = read_photo_upload(multipart).await?;
    let usecase = StorePhotoUseCase {
        store: state.photos.clone(),
    };
    let bucket = upload.bucket.as_deref().unwrap_or(REGISTRATION_BUCKET);
    let reference = usecase
        .execute(bucket, &upload.filename, upload.data)
        .await?;
    Ok(Json(PhotoResponse { reference }))
}

// ── PUT /users/me/photo ──────────────────────────────────────────────────────

pub async fn replace_my_photo(
    identity: Identity,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PhotoResponse>, AccountsServiceError> {
    let upload = read_photo_upload(multipart).await?;
    let usecase = ReplacePhotoUseCase {
        repo: state.user_repo(),
        store: state.photos.clone(),
    };
    let reference = usecase
        .execute(identity.user_id, &upload.filename, upload.data)
        .await?;
    Ok(Json(PhotoResponse { reference }))
}
