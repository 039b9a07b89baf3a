//! In-process store for local development and tests.
//!
//! Users and posts live in insertion-ordered vectors behind a single
//! `RwLock`, so each repository call is atomic on its own, much like a
//! per-document write in a document database.

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use postboard_core::AppError;
use postboard_models::{NewPost, NewUser, Post, PostId, UserId, UserRecord};

use crate::repository::{PostRepository, UserRepository};

#[derive(Debug, Default)]
struct MemoryData {
    users: Vec<UserRecord>,
    posts: Vec<Post>,
}

impl MemoryData {
    fn user(&self, id: UserId) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.id == id)
    }

    fn user_mut(&mut self, id: UserId) -> Option<&mut UserRecord> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    fn with_creator(&self, post: &Post) -> Option<(Post, UserRecord)> {
        self.user(post.creator)
            .map(|creator| (post.clone(), creator.clone()))
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<MemoryData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let data = self.data.read().await;
        Ok(data.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, AppError> {
        let data = self.data.read().await;
        Ok(data.user(id).cloned())
    }

    async fn insert(&self, new_user: NewUser) -> Result<UserRecord, AppError> {
        let mut data = self.data.write().await;
        if data.users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::duplicate_user(anyhow!("User exist")));
        }

        let now = Utc::now();
        let record = UserRecord {
            id: UserId::new(),
            email: new_user.email,
            name: new_user.name,
            password_hash: new_user.password_hash,
            posts: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        data.users.push(record.clone());

        Ok(record)
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn insert(&self, new_post: NewPost) -> Result<Post, AppError> {
        let mut data = self.data.write().await;
        let now = Utc::now();
        let post = Post {
            id: PostId::new(),
            title: new_post.title,
            content: new_post.content,
            creator: new_post.creator,
            created_at: now,
            updated_at: now,
        };

        let Some(creator) = data.user_mut(post.creator) else {
            return Err(AppError::internal(anyhow!(
                "Post creator {} does not exist",
                post.creator
            )));
        };
        creator.posts.push(post.id);
        creator.updated_at = now;
        data.posts.push(post.clone());

        Ok(post)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, AppError> {
        let data = self.data.read().await;
        Ok(data.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_with_creator(
        &self,
        id: PostId,
    ) -> Result<Option<(Post, UserRecord)>, AppError> {
        let data = self.data.read().await;
        Ok(data
            .posts
            .iter()
            .find(|p| p.id == id)
            .and_then(|p| data.with_creator(p)))
    }

    async fn list_with_creators(&self) -> Result<Vec<(Post, UserRecord)>, AppError> {
        let data = self.data.read().await;
        Ok(data
            .posts
            .iter()
            .filter_map(|p| data.with_creator(p))
            .collect())
    }

    async fn update(
        &self,
        id: PostId,
        title: &str,
        content: &str,
    ) -> Result<Option<Post>, AppError> {
        let mut data = self.data.write().await;
        let Some(post) = data.posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        post.title = title.to_string();
        post.content = content.to_string();
        post.updated_at = Utc::now();

        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: PostId) -> Result<bool, AppError> {
        let mut data = self.data.write().await;
        let Some(index) = data.posts.iter().position(|p| p.id == id) else {
            return Ok(false);
        };

        let post = data.posts.remove(index);
        if let Some(creator) = data.user_mut(post.creator) {
            creator.posts.retain(|p| *p != id);
            creator.updated_at = Utc::now();
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postboard_core::ErrorKind;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            name: "Test".to_string(),
            password_hash: "$2b$12$hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();
        UserRepository::insert(&store, new_user("test@test.com"))
            .await
            .unwrap();

        let err = UserRepository::insert(&store, new_user("test@test.com"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateUser);
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_sensitive() {
        let store = MemoryStore::new();
        UserRepository::insert(&store, new_user("Test@test.com"))
            .await
            .unwrap();

        assert!(store.find_by_email("test@test.com").await.unwrap().is_none());
        assert!(store.find_by_email("Test@test.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_post_list_keeps_insertion_order_and_resolves_creator() {
        let store = MemoryStore::new();
        let user = UserRepository::insert(&store, new_user("test@test.com"))
            .await
            .unwrap();

        let mut ids = Vec::new();
        for title in ["first", "second", "third"] {
            let post = PostRepository::insert(
                &store,
                NewPost {
                    title: title.to_string(),
                    content: "content".to_string(),
                    creator: user.id,
                },
            )
            .await
            .unwrap();
            ids.push(post.id);
        }

        let listed = store.list_with_creators().await.unwrap();
        let listed_ids: Vec<_> = listed.iter().map(|(p, _)| p.id).collect();
        assert_eq!(listed_ids, ids);
        assert!(listed.iter().all(|(_, creator)| creator.id == user.id));

        let owner = UserRepository::find_by_id(&store, user.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(owner.posts, ids);
    }

    #[tokio::test]
    async fn test_post_for_unknown_creator_rejected() {
        let store = MemoryStore::new();
        let result = PostRepository::insert(
            &store,
            NewPost {
                title: "A item".to_string(),
                content: "Good item".to_string(),
                creator: UserId::new(),
            },
        )
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = MemoryStore::new();
        let user = UserRepository::insert(&store, new_user("test@test.com"))
            .await
            .unwrap();
        let post = PostRepository::insert(
            &store,
            NewPost {
                title: "A item".to_string(),
                content: "Good item".to_string(),
                creator: user.id,
            },
        )
        .await
        .unwrap();

        let updated = store
            .update(post.id, "New title", "New content")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "New title");
        assert!(updated.updated_at >= post.updated_at);
        assert_eq!(updated.created_at, post.created_at);

        assert!(store.delete(post.id).await.unwrap());
        assert!(!store.delete(post.id).await.unwrap());
        assert!(store.update(post.id, "x", "y").await.unwrap().is_none());

        let owner = UserRepository::find_by_id(&store, user.id)
            .await
            .unwrap()
            .unwrap();
        assert!(owner.posts.is_empty());
    }
}
