//! # Postboard Models
//!
//! Entities, request DTOs and response shapes.
//!
//! - [`ids`]: `UserId` / `PostId` newtypes
//! - [`users`]: stored user record, public user, registration input
//! - [`auth`]: login request and token response
//! - [`posts`]: stored post, post input, post responses
//!
//! Stored records (`UserRecord`, `Post`) are what repositories speak; the
//! serializable views (`User`, `PostResponse`) are what leaves the API, with
//! ids rendered as `_id` and timestamps as ISO-8601.

pub mod auth;
pub mod ids;
pub mod posts;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{AuthData, LoginRequest};
pub use ids::{PostId, UserId};
pub use posts::{NewPost, Post, PostInput, PostList, PostResponse};
pub use users::{NewUser, User, UserInput, UserRecord};
