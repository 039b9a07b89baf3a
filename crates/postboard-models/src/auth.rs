//! Login DTOs.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::ids::UserId;

#[derive(Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "a@b.com")]
    pub email: String,
    #[schema(example = "123123")]
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login: a bearer token valid for one hour.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    pub token: String,
    pub user_id: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_data_wire_shape() {
        let user_id = UserId::new();
        let data = AuthData {
            token: "abc".to_string(),
            user_id,
        };
        let json = serde_json::to_value(&data).unwrap();

        assert_eq!(json["token"], "abc");
        assert_eq!(json["userId"], user_id.to_string());
    }
}
