//! JWT creation and verification.
//!
//! Tokens are HS256-signed with the secret from [`JwtConfig`] and expire
//! [`TOKEN_TTL_SECONDS`] after issuance.
//!
//! # Example
//!
//! ```ignore
//! use postboard_auth::{create_access_token, verify_token};
//! use postboard_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "a@b.com", &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.user_id()?, user_id);
//! ```

use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use postboard_config::JwtConfig;
use postboard_core::AppError;
use postboard_models::UserId;

use crate::claims::Claims;

/// Access tokens are valid for one hour.
pub const TOKEN_TTL_SECONDS: usize = 3600;

/// Issues a signed access token embedding `email` and `userId`.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn create_access_token(
    user_id: UserId,
    email: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        email: email.to_string(),
        user_id: user_id.to_string(),
        exp: now + TOKEN_TTL_SECONDS,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow!("Failed to create token: {}", e)))
}

/// Verifies signature and expiry and returns the embedded claims.
///
/// # Errors
///
/// Returns an unauthenticated error if:
/// - the token is malformed or its signature does not match
/// - the token has expired
/// - the `userId` claim is missing or empty
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::unauthenticated(anyhow!("Invalid or expired token: {}", e)))?;

    if claims.user_id.trim().is_empty() {
        return Err(AppError::unauthenticated(anyhow!(
            "Token is missing the userId claim"
        )));
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use postboard_core::ErrorKind;
    use serde::Serialize;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig::new("test-secret-key-at-least-32-characters-long")
    }

    fn encode_raw<T: Serialize>(claims: &T, config: &JwtConfig) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_create_and_verify_token() {
        let config = get_test_jwt_config();
        let user_id = UserId::new();

        let token = create_access_token(user_id, "test@example.com", &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.email, "test@example.com");
    }

    #[test]
    fn test_token_expires_after_one_hour() {
        let config = get_test_jwt_config();
        let token = create_access_token(UserId::new(), "test@example.com", &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_verify_token_invalid() {
        let config = get_test_jwt_config();
        let err = verify_token("invalid.token.here", &config).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let config = get_test_jwt_config();
        let token = create_access_token(UserId::new(), "test@example.com", &config).unwrap();

        let wrong_config = JwtConfig::new("different-secret-key-at-least-32-characters");
        assert!(verify_token(&token, &wrong_config).is_err());
    }

    #[test]
    fn test_verify_token_expired() {
        let config = get_test_jwt_config();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            email: "test@example.com".to_string(),
            user_id: UserId::new().to_string(),
            exp: now - 7200,
            iat: now - 10800,
        };

        let token = encode_raw(&claims, &config);
        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_verify_token_missing_user_id() {
        #[derive(Serialize)]
        struct EmailOnly {
            email: String,
            exp: usize,
            iat: usize,
        }

        let config = get_test_jwt_config();
        let now = Utc::now().timestamp() as usize;
        let token = encode_raw(
            &EmailOnly {
                email: "test@example.com".to_string(),
                exp: now + 600,
                iat: now,
            },
            &config,
        );

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_verify_token_empty_user_id() {
        let config = get_test_jwt_config();
        let now = Utc::now().timestamp() as usize;
        let token = encode_raw(
            &Claims {
                email: "test@example.com".to_string(),
                user_id: String::new(),
                exp: now + 600,
                iat: now,
            },
            &config,
        );

        assert!(verify_token(&token, &config).is_err());
    }
}
