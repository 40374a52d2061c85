use chrono::{DateTime, Utc};

use accounts_domain::user::UserRole;

/// User account owned by the account service.
///
/// `credential` is opaque secret material. It never appears in any response
/// representation; handler response types simply have no field for it.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub credential: String,
    pub role: UserRole,
    pub photo_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a registration; `id` and timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub credential: String,
    pub role: UserRole,
}

/// Template data for the welcome notification sent on registration.
#[derive(Debug, Clone, serde::Serialize)]
pub struct WelcomeEmail {
    pub subject: String,
    pub body: String,
}

/// File extensions accepted for profile photos. No content sniffing — the
/// client filename is the only signal, matching lowercased.
pub const ACCEPTED_PHOTO_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "webp", "svg", "jfif", "tiff"];

/// Whether a bucket label is safe to use as a single path component.
///
/// Buckets name directories under the photo root; anything that could walk
/// out of it (separators, `..`, absolute paths) or hide in listings is
/// rejected. The accepted alphabet is alphanumerics plus `-` and `_`.
pub fn valid_photo_bucket(bucket: &str) -> bool {
    !bucket.is_empty()
        && bucket
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Extract the photo extension from a client filename, if accepted.
///
/// The extension is everything after the *first* `.` in the filename, so
/// `photo.tar.gz` yields `tar.gz` and is rejected. Matching is
/// case-insensitive; the returned extension is lowercased for storage.
pub fn accepted_photo_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.split_once('.')?;
    let ext = ext.trim().to_ascii_lowercase();
    ACCEPTED_PHOTO_EXTENSIONS
        .contains(&ext.as_str())
        .then_some(ext)
}
