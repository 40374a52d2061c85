use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, SqlErr,
};

use accounts_domain::user::UserRole;
use accounts_schema::users;

use crate::domain::repository::UserRepository;
use crate::domain::types::{NewUser, User};
use crate::error::AccountsServiceError;

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn list(&self) -> Result<Vec<User>, AccountsServiceError> {
        let models = users::Entity::find()
            .all(&self.db)
            .await
            .context("list users")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AccountsServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountsServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &NewUser) -> Result<User, AccountsServiceError> {
        let now = Utc::now();
        let inserted = users::ActiveModel {
            email: Set(user.email.clone()),
            credential: Set(user.credential.clone()),
            role: Set(user.role.as_u8() as i16),
            photo_ref: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| map_write_err(e, "create user"))?;
        user_from_model(inserted)
    }

    async fn update_login(
        &self,
        id: i32,
        email: &str,
        credential: &str,
    ) -> Result<(), AccountsServiceError> {
        let am = users::ActiveModel {
            id: Set(id),
            email: Set(email.to_owned()),
            credential: Set(credential.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        am.update(&self.db)
            .await
            .map_err(|e| map_write_err(e, "update user login"))?;
        Ok(())
    }

    async fn update_email(&self, id: i32, email: &str) -> Result<(), AccountsServiceError> {
        let am = users::ActiveModel {
            id: Set(id),
            email: Set(email.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        am.update(&self.db)
            .await
            .map_err(|e| map_write_err(e, "update user email"))?;
        Ok(())
    }

    async fn set_photo_ref(&self, id: i32, photo_ref: &str) -> Result<(), AccountsServiceError> {
        let am = users::ActiveModel {
            id: Set(id),
            photo_ref: Set(Some(photo_ref.to_owned())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        am.update(&self.db)
            .await
            .map_err(|e| map_write_err(e, "set user photo ref"))?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, AccountsServiceError> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }
}

/// Map write-path store errors onto the domain taxonomy.
///
/// The unique index on `email` is the authority under concurrency; the
/// service's pre-checks only exist for precise messages. A write that loses
/// the race surfaces here as a unique violation and becomes `EmailTaken`.
fn map_write_err(e: DbErr, op: &'static str) -> AccountsServiceError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AccountsServiceError::EmailTaken,
        _ if matches!(e, DbErr::RecordNotUpdated) => AccountsServiceError::UserNotFound,
        _ => AccountsServiceError::Internal(anyhow::Error::new(e).context(op)),
    }
}

fn user_from_model(model: users::Model) -> Result<User, AccountsServiceError> {
    let role = u8::try_from(model.role)
        .ok()
        .and_then(UserRole::from_u8)
        .with_context(|| format!("unknown role value {} for user {}", model.role, model.id))?;
    Ok(User {
        id: model.id,
        email: model.email,
        credential: model.credential,
        role,
        photo_ref: model.photo_ref,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
