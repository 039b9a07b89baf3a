//! Post entities and DTOs.

use chrono::{DateTime, Utc};
use postboard_core::serde::iso8601;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{PostId, UserId};
use crate::users::User;

/// A post as persisted; `creator` is an unresolved reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub creator: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.creator == user_id
    }
}

/// Fields required to insert a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub creator: UserId,
}

/// Title and content supplied on create and update.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PostInput {
    #[validate(length(min = 5, message = "Title is invalid"))]
    #[schema(example = "A item")]
    pub title: String,
    #[validate(length(min = 5, message = "Content is invalid"))]
    #[schema(example = "Good item")]
    pub content: String,
}

/// Public view of a post with its creator resolved.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    #[serde(rename = "_id")]
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub creator: User,
    #[serde(with = "iso8601")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso8601")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl PostResponse {
    pub fn new(post: Post, creator: User) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            creator,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostList {
    pub posts: Vec<PostResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_input_lengths() {
        let ok = PostInput {
            title: "A item".to_string(),
            content: "Good item".to_string(),
        };
        assert!(ok.validate().is_ok());

        let short = PostInput {
            title: "test".to_string(),
            content: "test".to_string(),
        };
        let errors = short.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(errors.field_errors().contains_key("content"));
    }

    #[test]
    fn test_ownership() {
        let owner = UserId::new();
        let post = Post {
            id: PostId::new(),
            title: "A item".to_string(),
            content: "Good item".to_string(),
            creator: owner,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(post.is_owned_by(owner));
        assert!(!post.is_owned_by(UserId::new()));
    }
}
