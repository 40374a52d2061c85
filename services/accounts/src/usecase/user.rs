use accounts_domain::user::UserRole;

use crate::domain::repository::{Mailer, UserRepository};
use crate::domain::types::{NewUser, User, WelcomeEmail};
use crate::error::AccountsServiceError;

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<User>, AccountsServiceError> {
        self.repo.list().await
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

/// Fetch a single account by id. Serves both the admin get-by-id operation
/// and the caller's own profile read (id taken from the token).
pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, user_id: i32) -> Result<User, AccountsServiceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(AccountsServiceError::UserNotFound)
    }
}

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub email: String,
    pub credential: String,
    pub role: UserRole,
    pub welcome: WelcomeEmail,
}

pub struct RegisterUserUseCase<R: UserRepository, M: Mailer> {
    pub repo: R,
    pub mailer: M,
}

impl<R: UserRepository, M: Mailer> RegisterUserUseCase<R, M> {
    /// Register a new account, then dispatch the welcome notification.
    ///
    /// The pre-check gives a precise conflict answer, but the insert itself
    /// can still lose a race with a concurrent registration; the repository
    /// maps the store's unique violation to `EmailTaken`, so exactly one of
    /// two racing registrations succeeds.
    ///
    /// The welcome mail goes out only after the record is committed. Delivery
    /// failure is logged and does not undo the registration.
    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, AccountsServiceError> {
        if input.email.trim().is_empty() {
            return Err(AccountsServiceError::MissingEmail);
        }
        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(AccountsServiceError::EmailTaken);
        }

        let user = self
            .repo
            .create(&NewUser {
                email: input.email,
                credential: input.credential,
                role: input.role,
            })
            .await?;

        if let Err(e) = self.mailer.send_welcome(&input.welcome, &user.email).await {
            tracing::warn!(
                error = %e,
                user_id = user.id,
                "welcome mail not delivered; registration stands"
            );
        }

        Ok(user)
    }
}

// ── UpdateLogin ──────────────────────────────────────────────────────────────

pub struct UpdateLoginInput {
    pub email: String,
    pub credential: String,
}

/// Admin-side replacement of an account's email and credential.
pub struct UpdateLoginUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateLoginUseCase<R> {
    pub async fn execute(
        &self,
        user_id: i32,
        input: UpdateLoginInput,
    ) -> Result<(), AccountsServiceError> {
        if input.email.trim().is_empty() {
            return Err(AccountsServiceError::MissingEmail);
        }
        if self.repo.find_by_id(user_id).await?.is_none() {
            return Err(AccountsServiceError::UserNotFound);
        }
        // A record keeping its own email is not a conflict.
        if let Some(holder) = self.repo.find_by_email(&input.email).await? {
            if holder.id != user_id {
                return Err(AccountsServiceError::EmailTaken);
            }
        }
        self.repo
            .update_login(user_id, &input.email, &input.credential)
            .await
    }
}

// ── UpdateEmail ──────────────────────────────────────────────────────────────

/// Self-service email change for the authenticated caller.
pub struct UpdateEmailUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateEmailUseCase<R> {
    pub async fn execute(
        &self,
        user_id: i32,
        email: Option<String>,
    ) -> Result<(), AccountsServiceError> {
        let email = match email {
            Some(e) if !e.trim().is_empty() => e,
            _ => return Err(AccountsServiceError::MissingEmail),
        };
        if self.repo.find_by_id(user_id).await?.is_none() {
            return Err(AccountsServiceError::UserNotFound);
        }
        if let Some(holder) = self.repo.find_by_email(&email).await? {
            if holder.id != user_id {
                return Err(AccountsServiceError::EmailTaken);
            }
        }
        self.repo.update_email(user_id, &email).await
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    pub async fn execute(&self, user_id: i32) -> Result<(), AccountsServiceError> {
        if self.repo.delete(user_id).await? {
            Ok(())
        } else {
            Err(AccountsServiceError::UserNotFound)
        }
    }
}
