use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::users::repo_types::User;

fn validate_email_format(email: &str) -> Result<(), ValidationError> {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        let mut err = ValidationError::new("email");
        err.message = Some("must be a valid email address".into());
        Err(err)
    }
}

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(custom(function = "validate_email_format"))]
    #[schema(format = "email")]
    pub email: String,
    pub name: Option<String>,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    #[schema(min_length = 6)]
    pub password: String,
}

/// Request body for `PUT /users/:id`. Every field is optional.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(custom(function = "validate_email_format"))]
    #[schema(format = "email")]
    pub email: Option<String>,
    pub name: Option<String>,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    #[schema(min_length = 6)]
    pub password: Option<String>,
}

/// Outward view of a user. Built only through `From<User>`, which drops the
/// password hash.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        let User {
            id,
            email,
            name,
            password_hash: _,
            created_at,
            updated_at,
        } = user;
        Self {
            id,
            email,
            name,
            created_at,
            updated_at,
        }
    }
}
