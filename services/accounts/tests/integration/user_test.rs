use accounts_domain::user::UserRole;
use accounts_service::domain::repository::UserRepository;
use accounts_service::domain::types::NewUser;
use accounts_service::error::AccountsServiceError;
use accounts_service::usecase::user::{
    DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, RegisterUserInput, RegisterUserUseCase,
    UpdateEmailUseCase, UpdateLoginInput, UpdateLoginUseCase,
};

use crate::helpers::{InMemoryUserRepo, RecordingMailer, test_user, welcome};

fn register_input(email: &str) -> RegisterUserInput {
    RegisterUserInput {
        email: email.to_owned(),
        credential: "secret".to_owned(),
        role: UserRole::StandardUser,
        welcome: welcome(),
    }
}

// ── Registration ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_then_profile_fetch_returns_email() {
    let repo = InMemoryUserRepo::new();
    let mailer = RecordingMailer::new();

    let register = RegisterUserUseCase {
        repo: repo.clone(),
        mailer: mailer.clone(),
    };
    let created = register.execute(register_input("a@x.com")).await.unwrap();

    let profile = GetUserUseCase { repo: repo.clone() }
        .execute(created.id)
        .await
        .unwrap();
    assert_eq!(profile.email, "a@x.com");

    // welcome mail went to the new address, after the record was persisted
    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.as_slice(), [("a@x.com".to_owned(), "Welcome aboard".to_owned())]);
}

#[tokio::test]
async fn duplicate_registration_rejects_and_creates_nothing() {
    let repo = InMemoryUserRepo::new();
    let register = RegisterUserUseCase {
        repo: repo.clone(),
        mailer: RecordingMailer::new(),
    };

    register.execute(register_input("a@x.com")).await.unwrap();
    let result = register.execute(register_input("a@x.com")).await;

    assert!(matches!(result, Err(AccountsServiceError::EmailTaken)));
    assert_eq!(repo.count(), 1);
}

#[tokio::test]
async fn racing_insert_loses_to_the_unique_index() {
    // Both writers observed "no conflict" before either committed; the
    // second insert still fails because uniqueness lives in the store.
    let repo = InMemoryUserRepo::new();
    repo.create(&NewUser {
        email: "a@x.com".to_owned(),
        credential: "first".to_owned(),
        role: UserRole::StandardUser,
    })
    .await
    .unwrap();

    let result = repo
        .create(&NewUser {
            email: "a@x.com".to_owned(),
            credential: "second".to_owned(),
            role: UserRole::StandardUser,
        })
        .await;

    assert!(matches!(result, Err(AccountsServiceError::EmailTaken)));
    assert_eq!(repo.count(), 1);
}

#[tokio::test]
async fn mail_failure_does_not_undo_registration() {
    let repo = InMemoryUserRepo::new();
    let register = RegisterUserUseCase {
        repo: repo.clone(),
        mailer: RecordingMailer::failing(),
    };

    let created = register.execute(register_input("a@x.com")).await.unwrap();
    assert!(repo.find_by_id(created.id).await.unwrap().is_some());
}

// ── Email updates ────────────────────────────────────────────────────────────

#[tokio::test]
async fn own_email_update_is_reflected_and_blocks_reregistration() {
    let repo = InMemoryUserRepo::with_users(vec![test_user(1, "a@x.com")]);

    UpdateEmailUseCase { repo: repo.clone() }
        .execute(1, Some("b@x.com".to_owned()))
        .await
        .unwrap();

    let user = GetUserUseCase { repo: repo.clone() }.execute(1).await.unwrap();
    assert_eq!(user.email, "b@x.com");

    let register = RegisterUserUseCase {
        repo: repo.clone(),
        mailer: RecordingMailer::new(),
    };
    let result = register.execute(register_input("b@x.com")).await;
    assert!(matches!(result, Err(AccountsServiceError::EmailTaken)));
}

#[tokio::test]
async fn updating_email_to_its_own_current_value_succeeds() {
    let repo = InMemoryUserRepo::with_users(vec![test_user(1, "a@x.com")]);

    UpdateEmailUseCase { repo: repo.clone() }
        .execute(1, Some("a@x.com".to_owned()))
        .await
        .unwrap();

    UpdateLoginUseCase { repo: repo.clone() }
        .execute(
            1,
            UpdateLoginInput {
                email: "a@x.com".to_owned(),
                credential: "rotated".to_owned(),
            },
        )
        .await
        .unwrap();

    let user = repo.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(user.credential, "rotated");
}

#[tokio::test]
async fn email_update_to_anothers_address_is_rejected() {
    let repo =
        InMemoryUserRepo::with_users(vec![test_user(1, "a@x.com"), test_user(2, "b@x.com")]);

    let result = UpdateEmailUseCase { repo: repo.clone() }
        .execute(1, Some("b@x.com".to_owned()))
        .await;
    assert!(matches!(result, Err(AccountsServiceError::EmailTaken)));

    // unchanged
    let user = repo.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(user.email, "a@x.com");
}

// ── Delete / list ────────────────────────────────────────────────────────────

#[tokio::test]
async fn deleting_unknown_id_is_a_noop_not_found() {
    let repo = InMemoryUserRepo::with_users(vec![test_user(1, "a@x.com")]);

    let result = DeleteUserUseCase { repo: repo.clone() }.execute(99).await;
    assert!(matches!(result, Err(AccountsServiceError::UserNotFound)));
    assert_eq!(repo.count(), 1);
}

#[tokio::test]
async fn list_returns_every_account() {
    let repo =
        InMemoryUserRepo::with_users(vec![test_user(1, "a@x.com"), test_user(2, "b@x.com")]);

    let users = ListUsersUseCase { repo }.execute().await.unwrap();
    assert_eq!(users.len(), 2);
}
