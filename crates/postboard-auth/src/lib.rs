//! # Postboard Auth
//!
//! Token issuing and the per-request identity derived from it.
//!
//! - [`claims`]: the `{email, userId, exp, iat}` claim set
//! - [`jwt`]: issuing and verifying one-hour HS256 tokens
//! - [`context`]: [`RequestContext`], the result of checking a request's
//!   bearer token
//!
//! # Example
//!
//! ```ignore
//! use postboard_auth::{RequestContext, create_access_token};
//!
//! let token = create_access_token(user_id, "a@b.com", &jwt_config)?;
//! let header = format!("Bearer {}", token);
//! let ctx = RequestContext::from_authorization(Some(&header), &jwt_config);
//! assert_eq!(ctx.require_user()?, user_id);
//! ```

pub mod claims;
pub mod context;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use context::RequestContext;
pub use jwt::{TOKEN_TTL_SECONDS, create_access_token, verify_token};
