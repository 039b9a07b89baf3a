//! Storage seams used by the services.

use async_trait::async_trait;
use postboard_core::AppError;
use postboard_models::{NewPost, NewUser, Post, PostId, UserId, UserRecord};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, AppError>;

    /// Fails with `DuplicateUser` if the email is already taken.
    async fn insert(&self, new_user: NewUser) -> Result<UserRecord, AppError>;
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Stores the post and appends its id to the creator's post list as one write.
    async fn insert(&self, new_post: NewPost) -> Result<Post, AppError>;

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, AppError>;

    /// The post joined with its creator.
    async fn find_with_creator(&self, id: PostId)
    -> Result<Option<(Post, UserRecord)>, AppError>;

    /// Every post joined with its creator, oldest first.
    async fn list_with_creators(&self) -> Result<Vec<(Post, UserRecord)>, AppError>;

    /// Replaces title and content and bumps `updated_at`. `None` if the post is gone.
    async fn update(
        &self,
        id: PostId,
        title: &str,
        content: &str,
    ) -> Result<Option<Post>, AppError>;

    /// Removes the post and drops its id from the creator's post list as one
    /// write. Returns whether a post was removed.
    async fn delete(&self, id: PostId) -> Result<bool, AppError>;
}
