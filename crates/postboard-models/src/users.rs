//! User entities and DTOs.

use chrono::{DateTime, Utc};
use postboard_core::serde::iso8601;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{PostId, UserId};

/// A user as persisted, including the password hash.
///
/// Never serialized; convert into [`User`] before it leaves the service layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    /// Owned posts, in creation order.
    pub posts: Vec<PostId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to insert a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub posts: Vec<PostId>,
    #[serde(with = "iso8601")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso8601")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            name: record.name,
            posts: record.posts,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Registration input.
#[derive(Clone, Deserialize, Validate, ToSchema)]
pub struct UserInput {
    #[validate(email(message = "email invalid"))]
    #[schema(example = "a@b.com")]
    pub email: String,
    #[validate(length(min = 5, message = "password invalid"))]
    #[schema(example = "123123")]
    pub password: String,
    #[validate(length(min = 1, message = "name invalid"))]
    #[schema(example = "A")]
    pub name: String,
}

impl fmt::Debug for UserInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserInput")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}
