use bytes::Bytes;

use crate::domain::repository::{PhotoStore, UserRepository};
use crate::domain::types::{accepted_photo_extension, valid_photo_bucket};
use crate::error::AccountsServiceError;

/// Bucket used for uploads not yet attached to an account.
pub const REGISTRATION_BUCKET: &str = "registration";

/// Bucket holding the photos referenced by account records.
pub const PROFILE_BUCKET: &str = "profiles";

// ── StorePhoto ───────────────────────────────────────────────────────────────

/// Registration-time upload: validate the filename, store the payload under
/// the given bucket, and return the stored reference. No account record is
/// touched.
pub struct StorePhotoUseCase<P: PhotoStore> {
    pub store: P,
}

impl<P: PhotoStore> StorePhotoUseCase<P> {
    pub async fn execute(
        &self,
        bucket: &str,
        filename: &str,
        data: Bytes,
    ) -> Result<String, AccountsServiceError> {
        // The bucket label is client-controlled; anything that is not a
        // plain directory name never reaches the store.
        if !valid_photo_bucket(bucket) {
            return Err(AccountsServiceError::InvalidMultipart);
        }
        let ext = accepted_photo_extension(filename)
            .ok_or(AccountsServiceError::UnsupportedPhotoFormat)?;
        self.store.store(bucket, &ext, data).await
    }
}

// ── ReplacePhoto ─────────────────────────────────────────────────────────────

/// Replace the caller's profile photo: validate, store, then record the new
/// reference on the caller's account.
pub struct ReplacePhotoUseCase<R: UserRepository, P: PhotoStore> {
    pub repo: R,
    pub store: P,
}

impl<R: UserRepository, P: PhotoStore> ReplacePhotoUseCase<R, P> {
    pub async fn execute(
        &self,
        user_id: i32,
        filename: &str,
        data: Bytes,
    ) -> Result<String, AccountsServiceError> {
        let ext = accepted_photo_extension(filename)
            .ok_or(AccountsServiceError::UnsupportedPhotoFormat)?;
        if self.repo.find_by_id(user_id).await?.is_none() {
            return Err(AccountsServiceError::UserNotFound);
        }
        let stored = self.store.store(PROFILE_BUCKET, &ext, data).await?;
        self.repo.set_photo_ref(user_id, &stored).await?;
        Ok(stored)
    }
}
