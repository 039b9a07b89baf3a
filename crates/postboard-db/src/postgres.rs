//! PostgreSQL-backed repositories.
//!
//! A user's post list is a `UUID[]` column maintained with `array_append` /
//! `array_remove` in the same transaction as the post write, so it keeps
//! creation order just like the `posts` table.

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use postboard_core::AppError;
use postboard_models::{NewPost, NewUser, Post, PostId, UserId, UserRecord};

use crate::repository::{PostRepository, UserRepository};

const USER_COLUMNS: &str = "id, email, name, password, posts, created_at, updated_at";
const POST_COLUMNS: &str = "id, title, content, creator, created_at, updated_at";

const POST_WITH_CREATOR: &str = r#"
    SELECT p.id, p.title, p.content, p.creator, p.created_at, p.updated_at,
           u.email AS creator_email, u.name AS creator_name,
           u.password AS creator_password, u.posts AS creator_posts,
           u.created_at AS creator_created_at, u.updated_at AS creator_updated_at
    FROM posts p
    JOIN users u ON u.id = p.creator
"#;

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
    password: String,
    posts: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            email: row.email,
            name: row.name,
            password_hash: row.password,
            posts: row.posts.into_iter().map(PostId::from_uuid).collect(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    content: String,
    creator: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: PostId::from_uuid(row.id),
            title: row.title,
            content: row.content,
            creator: UserId::from_uuid(row.creator),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(FromRow)]
struct PostWithCreatorRow {
    #[sqlx(flatten)]
    post: PostRow,
    creator_email: String,
    creator_name: String,
    creator_password: String,
    creator_posts: Vec<Uuid>,
    creator_created_at: DateTime<Utc>,
    creator_updated_at: DateTime<Utc>,
}

impl From<PostWithCreatorRow> for (Post, UserRecord) {
    fn from(row: PostWithCreatorRow) -> Self {
        let creator = UserRecord {
            id: UserId::from_uuid(row.post.creator),
            email: row.creator_email,
            name: row.creator_name,
            password_hash: row.creator_password,
            posts: row
                .creator_posts
                .into_iter()
                .map(PostId::from_uuid)
                .collect(),
            created_at: row.creator_created_at,
            updated_at: row.creator_updated_at,
        };
        (row.post.into(), creator)
    }
}

/// Both repositories over one connection pool.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgStore {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by email")
        .map_err(AppError::internal)?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by ID")
        .map_err(AppError::internal)?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self, new_user), fields(email = %new_user.email))]
    async fn insert(&self, new_user: NewUser) -> Result<UserRecord, AppError> {
        let result = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (id, email, name, password) VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(UserId::new().into_inner())
        .bind(&new_user.email)
        .bind(&new_user.name)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::duplicate_user(anyhow!("User exist")))
            }
            Err(e) => Err(AppError::internal(
                anyhow::Error::new(e).context("Failed to insert user"),
            )),
        }
    }
}

#[async_trait]
impl PostRepository for PgStore {
    #[instrument(skip(self, new_post), fields(creator = %new_post.creator))]
    async fn insert(&self, new_post: NewPost) -> Result<Post, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")
            .map_err(AppError::internal)?;

        let row = sqlx::query_as::<_, PostRow>(&format!(
            "INSERT INTO posts (id, title, content, creator) VALUES ($1, $2, $3, $4) RETURNING {}",
            POST_COLUMNS
        ))
        .bind(PostId::new().into_inner())
        .bind(&new_post.title)
        .bind(&new_post.content)
        .bind(new_post.creator.into_inner())
        .fetch_one(&mut *tx)
        .await
        .context("Failed to insert post")
        .map_err(AppError::internal)?;

        sqlx::query(
            "UPDATE users SET posts = array_append(posts, $2), updated_at = NOW() WHERE id = $1",
        )
        .bind(row.creator)
        .bind(row.id)
        .execute(&mut *tx)
        .await
        .context("Failed to append post to user")
        .map_err(AppError::internal)?;

        tx.commit()
            .await
            .context("Failed to commit post insert")
            .map_err(AppError::internal)?;

        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, AppError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {} FROM posts WHERE id = $1",
            POST_COLUMNS
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch post by ID")
        .map_err(AppError::internal)?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn find_with_creator(
        &self,
        id: PostId,
    ) -> Result<Option<(Post, UserRecord)>, AppError> {
        let row = sqlx::query_as::<_, PostWithCreatorRow>(&format!(
            "{} WHERE p.id = $1",
            POST_WITH_CREATOR
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch post with creator")
        .map_err(AppError::internal)?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn list_with_creators(&self) -> Result<Vec<(Post, UserRecord)>, AppError> {
        let rows = sqlx::query_as::<_, PostWithCreatorRow>(&format!(
            "{} ORDER BY p.created_at, p.id",
            POST_WITH_CREATOR
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch posts")
        .map_err(AppError::internal)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, title, content))]
    async fn update(
        &self,
        id: PostId,
        title: &str,
        content: &str,
    ) -> Result<Option<Post>, AppError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "UPDATE posts SET title = $2, content = $3, updated_at = NOW() WHERE id = $1 RETURNING {}",
            POST_COLUMNS
        ))
        .bind(id.into_inner())
        .bind(title)
        .bind(content)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update post")
        .map_err(AppError::internal)?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: PostId) -> Result<bool, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")
            .map_err(AppError::internal)?;

        let creator =
            sqlx::query_scalar::<_, Uuid>("DELETE FROM posts WHERE id = $1 RETURNING creator")
                .bind(id.into_inner())
                .fetch_optional(&mut *tx)
                .await
                .context("Failed to delete post")
                .map_err(AppError::internal)?;

        // Nothing deleted; dropping `tx` rolls back.
        let Some(creator) = creator else {
            return Ok(false);
        };

        sqlx::query(
            "UPDATE users SET posts = array_remove(posts, $2), updated_at = NOW() WHERE id = $1",
        )
        .bind(creator)
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .context("Failed to remove post from user")
        .map_err(AppError::internal)?;

        tx.commit()
            .await
            .context("Failed to commit post delete")
            .map_err(AppError::internal)?;

        Ok(true)
    }
}
