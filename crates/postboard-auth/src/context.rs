//! Per-request identity derived from the `Authorization` header.

use anyhow::anyhow;
use postboard_config::JwtConfig;
use postboard_core::AppError;
use postboard_models::UserId;

use crate::jwt::verify_token;

/// Who is making the request, as far as the bearer token can tell.
///
/// Deriving a context never fails: an absent or bad token simply yields an
/// anonymous context, and each operation decides whether that is acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestContext {
    pub authenticated: bool,
    pub user_id: Option<UserId>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user_id: UserId) -> Self {
        Self {
            authenticated: true,
            user_id: Some(user_id),
        }
    }

    /// Resolves the context from a raw `Authorization` header value.
    pub fn from_authorization(header: Option<&str>, jwt_config: &JwtConfig) -> Self {
        let Some(token) = header.and_then(bearer_token) else {
            return Self::anonymous();
        };

        match verify_token(token, jwt_config).and_then(|claims| claims.user_id()) {
            Ok(user_id) => Self::authenticated(user_id),
            Err(err) => {
                tracing::debug!(error = %err, "Ignoring unverifiable bearer token");
                Self::anonymous()
            }
        }
    }

    /// The requesting user's id, or `Unauthenticated`.
    pub fn require_user(&self) -> Result<UserId, AppError> {
        match (self.authenticated, self.user_id) {
            (true, Some(user_id)) => Ok(user_id),
            _ => Err(AppError::unauthenticated(anyhow!("Not Authenticated!"))),
        }
    }
}

fn bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}
