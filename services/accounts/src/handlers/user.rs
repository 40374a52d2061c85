use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::{Json, response::IntoResponse};
use serde::{Deserialize, Serialize};

use accounts_auth::identity::Identity;
use accounts_domain::user::UserRole;

use crate::domain::types::{User, WelcomeEmail};
use crate::error::AccountsServiceError;
use crate::state::AppState;
use crate::usecase::user::{
    DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, RegisterUserInput, RegisterUserUseCase,
    UpdateEmailUseCase, UpdateLoginInput, UpdateLoginUseCase,
};

/// Response representation of a user account. There is deliberately no
/// credential field here, so the secret cannot leak through any list or
/// fetch operation.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub role: UserRole,
    pub photo_ref: Option<String>,
    #[serde(serialize_with = "accounts_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "accounts_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            photo_ref: user.photo_ref,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

fn require_admin(identity: &Identity) -> Result<(), AccountsServiceError> {
    if identity.role.is_admin() {
        Ok(())
    } else {
        Err(AccountsServiceError::Forbidden)
    }
}

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn list_users(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AccountsServiceError> {
    require_admin(&identity)?;
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users = usecase.execute().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// ── GET /users/me ────────────────────────────────────────────────────────────

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, AccountsServiceError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(user.into()))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, AccountsServiceError> {
    require_admin(&identity)?;
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(id).await?;
    Ok(Json(user.into()))
}

// ── POST /users ──────────────────────────────────────────────────────────────

/// Registration form fields collected from the multipart body.
#[derive(Default)]
struct RegisterForm {
    email: Option<String>,
    credential: Option<String>,
    role: Option<u8>,
    subject: Option<String>,
    body: Option<String>,
}

async fn read_register_form(
    mut multipart: Multipart,
) -> Result<RegisterForm, AccountsServiceError> {
    let mut form = RegisterForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AccountsServiceError::InvalidMultipart)?
    {
        let name = field.name().unwrap_or_default().to_owned();
        let value = field
            .text()
            .await
            .map_err(|_| AccountsServiceError::InvalidMultipart)?;
        match name.as_str() {
            "email" => form.email = Some(value),
            "credential" => form.credential = Some(value),
            "role" => {
                form.role =
                    Some(value.parse().map_err(|_| AccountsServiceError::InvalidMultipart)?)
            }
            "subject" => form.subject = Some(value),
            "body" => form.body = Some(value),
            _ => {}
        }
    }
    Ok(form)
}

pub async fn create_user(
    identity: Identity,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AccountsServiceError> {
    require_admin(&identity)?;
    let form = read_register_form(multipart).await?;

    let email = form.email.ok_or(AccountsServiceError::MissingEmail)?;
    let credential = form
        .credential
        .ok_or(AccountsServiceError::InvalidMultipart)?;
    let role = UserRole::from_u8(form.role.unwrap_or(0))
        .ok_or(AccountsServiceError::InvalidMultipart)?;

    let usecase = RegisterUserUseCase {
        repo: state.user_repo(),
        mailer: state.mailer.clone(),
    };
    let user = usecase
        .execute(RegisterUserInput {
            email,
            credential,
            role,
            welcome: WelcomeEmail {
                subject: form.subject.unwrap_or_else(|| "Welcome".to_owned()),
                body: form.body.unwrap_or_default(),
            },
        })
        .await?;

    let body = serde_json::json!({
        "id": user.id,
        "message": format!("user with email '{}' registered", user.email),
    });
    Ok((StatusCode::CREATED, Json(body)))
}

// ── PATCH /users/{id}/credentials ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateCredentialsRequest {
    pub email: String,
    pub credential: String,
}

pub async fn update_credentials(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateCredentialsRequest>,
) -> Result<StatusCode, AccountsServiceError> {
    require_admin(&identity)?;
    let usecase = UpdateLoginUseCase {
        repo: state.user_repo(),
    };
    usecase
        .execute(
            id,
            UpdateLoginInput {
                email: body.email,
                credential: body.credential,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── PATCH /users/me/email ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateEmailRequest {
    pub email: Option<String>,
}

pub async fn update_my_email(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<UpdateEmailRequest>,
) -> Result<StatusCode, AccountsServiceError> {
    let usecase = UpdateEmailUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(identity.user_id, body.email).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /users/{id} ───────────────────────────────────────────────────────

pub async fn delete_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AccountsServiceError> {
    require_admin(&identity)?;
    let usecase = DeleteUserUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
