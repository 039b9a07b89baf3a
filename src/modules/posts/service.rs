use anyhow::anyhow;
use tracing::{debug, info, instrument, warn};

use postboard_auth::RequestContext;
use postboard_core::{AppError, validate_input};
use postboard_db::Store;
use postboard_models::{NewPost, PostId, PostInput, PostList, PostResponse};

use crate::metrics;

/// A path id that is not a valid UUID cannot name an existing post.
fn parse_post_id(id: &str) -> Result<PostId, AppError> {
    id.parse::<PostId>()
        .map_err(|_| AppError::not_found(anyhow!("Post not found!")))
}

fn forbidden() -> AppError {
    AppError::forbidden(anyhow!("Not authorized!"))
}

pub struct PostService;

impl PostService {
    #[instrument(skip(store, input), fields(user.id = ?ctx.user_id))]
    pub async fn create_post(
        store: &Store,
        ctx: RequestContext,
        input: PostInput,
    ) -> Result<PostResponse, AppError> {
        let user_id = ctx.require_user()?;
        validate_input(&input)?;

        // A valid token for a since-removed account is no identity at all.
        let Some(mut creator) = store.users.find_by_id(user_id).await? else {
            warn!(user.id = %user_id, "Token refers to a missing user");
            return Err(AppError::unauthenticated(anyhow!("User not found")));
        };

        let post = store
            .posts
            .insert(NewPost {
                title: input.title,
                content: input.content,
                creator: creator.id,
            })
            .await?;
        creator.posts.push(post.id);

        metrics::track_post_operation("create");
        info!(post.id = %post.id, "Post created");

        Ok(PostResponse::new(post, creator.into()))
    }

    #[instrument(skip(store), fields(user.id = ?ctx.user_id))]
    pub async fn list_posts(store: &Store, ctx: RequestContext) -> Result<PostList, AppError> {
        ctx.require_user()?;

        let posts: Vec<PostResponse> = store
            .posts
            .list_with_creators()
            .await?
            .into_iter()
            .map(|(post, creator)| PostResponse::new(post, creator.into()))
            .collect();

        debug!(count = posts.len(), "Listed posts");

        Ok(PostList { posts })
    }

    #[instrument(skip(store, input), fields(user.id = ?ctx.user_id))]
    pub async fn update_post(
        store: &Store,
        ctx: RequestContext,
        id: &str,
        input: PostInput,
    ) -> Result<PostResponse, AppError> {
        let user_id = ctx.require_user()?;
        validate_input(&input)?;
        let post_id = parse_post_id(id)?;

        let (post, creator) = store
            .posts
            .find_with_creator(post_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Post not found!")))?;

        if !post.is_owned_by(user_id) {
            warn!(post.id = %post.id, post.creator = %post.creator, "Update by non-owner rejected");
            return Err(forbidden());
        }

        // Deleted between the lookup and the write.
        let updated = store
            .posts
            .update(post_id, &input.title, &input.content)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Post not found!")))?;

        metrics::track_post_operation("update");
        info!(post.id = %updated.id, "Post updated");

        Ok(PostResponse::new(updated, creator.into()))
    }

    #[instrument(skip(store), fields(user.id = ?ctx.user_id))]
    pub async fn delete_post(
        store: &Store,
        ctx: RequestContext,
        id: &str,
    ) -> Result<bool, AppError> {
        let user_id = ctx.require_user()?;
        let post_id = parse_post_id(id)?;

        let post = store
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Post not found!")))?;

        if !post.is_owned_by(user_id) {
            warn!(post.id = %post.id, post.creator = %post.creator, "Delete by non-owner rejected");
            return Err(forbidden());
        }

        if !store.posts.delete(post_id).await? {
            return Err(AppError::not_found(anyhow!("Post not found!")));
        }

        metrics::track_post_operation("delete");
        info!(post.id = %post_id, "Post deleted");

        Ok(true)
    }
}
