use std::sync::{Arc, Mutex};

use bytes::Bytes;
use chrono::Utc;

use accounts_domain::user::UserRole;
use accounts_service::domain::repository::{Mailer, PhotoStore, UserRepository};
use accounts_service::domain::types::{NewUser, User, WelcomeEmail};
use accounts_service::error::AccountsServiceError;

// ── InMemoryUserRepo ─────────────────────────────────────────────────────────

/// In-memory stand-in for the database, including the unique index on email:
/// `create` rejects a duplicate address regardless of any pre-check, exactly
/// like the store does when two writers race.
#[derive(Clone)]
pub struct InMemoryUserRepo {
    users: Arc<Mutex<Vec<User>>>,
    next_id: Arc<Mutex<i32>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(vec![])),
            next_id: Arc::new(Mutex::new(1)),
        }
    }

    pub fn with_users(users: Vec<User>) -> Self {
        let next_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Self {
            users: Arc::new(Mutex::new(users)),
            next_id: Arc::new(Mutex::new(next_id)),
        }
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

impl UserRepository for InMemoryUserRepo {
    async fn list(&self) -> Result<Vec<User>, AccountsServiceError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AccountsServiceError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountsServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, AccountsServiceError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AccountsServiceError::EmailTaken);
        }
        let mut next_id = self.next_id.lock().unwrap();
        let now = Utc::now();
        let created = User {
            id: *next_id,
            email: user.email.clone(),
            credential: user.credential.clone(),
            role: user.role,
            photo_ref: None,
            created_at: now,
            updated_at: now,
        };
        *next_id += 1;
        users.push(created.clone());
        Ok(created)
    }

    async fn update_login(
        &self,
        id: i32,
        email: &str,
        credential: &str,
    ) -> Result<(), AccountsServiceError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email && u.id != id) {
            return Err(AccountsServiceError::EmailTaken);
        }
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AccountsServiceError::UserNotFound)?;
        user.email = email.to_owned();
        user.credential = credential.to_owned();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn update_email(&self, id: i32, email: &str) -> Result<(), AccountsServiceError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email && u.id != id) {
            return Err(AccountsServiceError::EmailTaken);
        }
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AccountsServiceError::UserNotFound)?;
        user.email = email.to_owned();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn set_photo_ref(&self, id: i32, photo_ref: &str) -> Result<(), AccountsServiceError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AccountsServiceError::UserNotFound)?;
        user.photo_ref = Some(photo_ref.to_owned());
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, AccountsServiceError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

// ── RecordingMailer ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct RecordingMailer {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    pub fail: bool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
            fail: true,
        }
    }
}

impl Mailer for RecordingMailer {
    async fn send_welcome(
        &self,
        email: &WelcomeEmail,
        to: &str,
    ) -> Result<(), AccountsServiceError> {
        if self.fail {
            return Err(AccountsServiceError::Internal(anyhow::anyhow!(
                "mail delivery timed out"
            )));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_owned(), email.subject.clone()));
        Ok(())
    }
}

// ── MemoryPhotoStore ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MemoryPhotoStore {
    pub stored: Arc<Mutex<Vec<String>>>,
}

impl MemoryPhotoStore {
    pub fn new() -> Self {
        Self {
            stored: Arc::new(Mutex::new(vec![])),
        }
    }
}

impl PhotoStore for MemoryPhotoStore {
    async fn store(
        &self,
        bucket: &str,
        extension: &str,
        _data: Bytes,
    ) -> Result<String, AccountsServiceError> {
        let reference = format!("{bucket}/{}.{extension}", self.stored.lock().unwrap().len());
        self.stored.lock().unwrap().push(reference.clone());
        Ok(reference)
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user(id: i32, email: &str) -> User {
    User {
        id,
        email: email.to_owned(),
        credential: "secret".to_owned(),
        role: UserRole::StandardUser,
        photo_ref: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn welcome() -> WelcomeEmail {
    WelcomeEmail {
        subject: "Welcome aboard".to_owned(),
        body: "Your account is ready.".to_owned(),
    }
}
