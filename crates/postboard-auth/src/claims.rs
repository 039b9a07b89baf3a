//! JWT claim structure embedded in access tokens.

use anyhow::anyhow;
use postboard_core::AppError;
use postboard_models::UserId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims carried by an access token.
///
/// `userId` is required; a token without it fails to decode and is treated
/// exactly like a token with a bad signature.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub email: String,
    pub user_id: String,
    /// Expiration (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.user_id
            .parse()
            .map_err(|_| AppError::unauthenticated(anyhow!("Invalid user id in token")))
    }
}
