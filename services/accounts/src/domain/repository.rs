#![allow(async_fn_in_trait)]

use bytes::Bytes;

use crate::domain::types::{NewUser, User, WelcomeEmail};
use crate::error::AccountsServiceError;

/// Repository for user accounts.
///
/// `create` and both update operations surface a store-level email unique
/// violation as [`AccountsServiceError::EmailTaken`] — under concurrent
/// writes the unique index, not the service's pre-check, decides the winner.
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, AccountsServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AccountsServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountsServiceError>;
    /// Insert a new account. Returns the record with its store-assigned id.
    async fn create(&self, user: &NewUser) -> Result<User, AccountsServiceError>;
    /// Replace email and credential of an existing account.
    async fn update_login(
        &self,
        id: i32,
        email: &str,
        credential: &str,
    ) -> Result<(), AccountsServiceError>;
    /// Replace only the email of an existing account.
    async fn update_email(&self, id: i32, email: &str) -> Result<(), AccountsServiceError>;
    /// Record the stored photo reference on an account.
    async fn set_photo_ref(&self, id: i32, photo_ref: &str) -> Result<(), AccountsServiceError>;
    /// Delete an account. Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, AccountsServiceError>;
}

/// Port for the outbound mail delivery service.
pub trait Mailer: Send + Sync {
    async fn send_welcome(
        &self,
        email: &WelcomeEmail,
        to: &str,
    ) -> Result<(), AccountsServiceError>;
}

/// Port for binary photo storage.
pub trait PhotoStore: Send + Sync {
    /// Store a photo under `bucket`, returning the stored reference.
    async fn store(
        &self,
        bucket: &str,
        extension: &str,
        data: Bytes,
    ) -> Result<String, AccountsServiceError>;
}
