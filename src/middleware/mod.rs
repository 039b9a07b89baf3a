//! Request middleware.
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`auth::access_guard`] verifies the token and stores a
//!    [`RequestContext`](postboard_auth::RequestContext) in the request
//!    extensions, anonymous when the token is absent or invalid
//! 3. Handlers read it through the [`auth::AuthContext`] extractor
//! 4. Services call `require_user()` where an identity is mandatory
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthContext;
//!
//! async fn whoami(AuthContext(ctx): AuthContext) -> Result<String, AppError> {
//!     Ok(ctx.require_user()?.to_string())
//! }
//! ```

pub mod auth;
