use sea_orm::DatabaseConnection;

use accounts_auth::identity::JwtSecretSource;

use crate::infra::db::DbUserRepository;
use crate::infra::mail::HttpMailer;
use crate::infra::storage::DiskPhotoStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub mailer: HttpMailer,
    pub photos: DiskPhotoStore,
    pub jwt_secret: String,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }
}

impl JwtSecretSource for AppState {
    fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
}
