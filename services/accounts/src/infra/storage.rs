use std::path::PathBuf;

use anyhow::Context as _;
use bytes::Bytes;
use uuid::Uuid;

use crate::domain::repository::PhotoStore;
use crate::domain::types::valid_photo_bucket;
use crate::error::AccountsServiceError;

/// Photo storage on the local filesystem.
///
/// Files land under `{root}/{bucket}/{uuid}.{ext}`; the returned reference
/// is the path relative to the root, which is what gets recorded on the
/// account and handed back to clients.
#[derive(Clone)]
pub struct DiskPhotoStore {
    pub root: PathBuf,
}

impl DiskPhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PhotoStore for DiskPhotoStore {
    async fn store(
        &self,
        bucket: &str,
        extension: &str,
        data: Bytes,
    ) -> Result<String, AccountsServiceError> {
        // Enforced here as well as at the client boundary: a bucket must be
        // a single path component, or the `{root}/{bucket}/...` contract
        // would not hold.
        if !valid_photo_bucket(bucket) {
            return Err(AccountsServiceError::InvalidMultipart);
        }
        let dir = self.root.join(bucket);
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create photo bucket {}", dir.display()))?;

        let name = format!("{}.{extension}", Uuid::new_v4());
        let path = dir.join(&name);
        tokio::fs::write(&path, &data)
            .await
            .with_context(|| format!("write photo {}", path.display()))?;

        Ok(format!("{bucket}/{name}"))
    }
}
