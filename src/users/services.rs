use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult, EMAIL_EXISTS, EMAIL_IN_USE};
use crate::users::dto::{CreateUserRequest, UpdateUserRequest};
use crate::users::password::hash_password;
use crate::users::repo::UserDatastore;
use crate::users::repo_types::{NewUser, User, UserChanges};

/// Business rules on top of a [`UserDatastore`]: unique emails and an
/// existence check before any mutation of a stored user.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserDatastore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserDatastore>) -> Self {
        Self { store }
    }

    pub async fn create_user(&self, input: CreateUserRequest) -> ApiResult<User> {
        if self.store.find_by_email(&input.email).await?.is_some() {
            return Err(ApiError::Conflict(EMAIL_EXISTS.into()));
        }

        let password_hash = hash_password(&input.password)?;
        let user = self
            .store
            .create(NewUser {
                id: Uuid::new_v4(),
                email: input.email,
                name: input.name,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "user created");
        Ok(user)
    }

    pub async fn get_user(&self, id: Uuid) -> ApiResult<User> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(ApiError::not_found)
    }

    pub async fn update_user(&self, id: Uuid, patch: UpdateUserRequest) -> ApiResult<User> {
        self.get_user(id).await?;

        if let Some(ref email) = patch.email {
            if let Some(owner) = self.store.find_by_email(email).await? {
                if owner.id != id {
                    return Err(ApiError::Conflict(EMAIL_IN_USE.into()));
                }
            }
        }

        let password_hash = patch.password.as_deref().map(hash_password).transpose()?;
        let user = self
            .store
            .update(
                id,
                UserChanges {
                    email: patch.email,
                    name: patch.name,
                    password_hash,
                },
            )
            .await
            .map_err(|e| match ApiError::from(e) {
                ApiError::Conflict(_) => ApiError::Conflict(EMAIL_IN_USE.into()),
                other => other,
            })?;

        info!(user_id = %user.id, "user updated");
        Ok(user)
    }

    pub async fn delete_user(&self, id: Uuid) -> ApiResult<()> {
        self.get_user(id).await?;
        self.store.delete(id).await?;
        info!(user_id = %id, "user deleted");
        Ok(())
    }

    pub async fn get_all_users(&self) -> ApiResult<Vec<User>> {
        let users = self.store.find_all().await?;
        debug!(count = users.len(), "users listed");
        Ok(users)
    }
}
