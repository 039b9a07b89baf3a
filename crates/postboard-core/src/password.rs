use anyhow::anyhow;
use bcrypt::{hash, verify};

use crate::errors::AppError;

/// bcrypt work factor for newly hashed passwords.
pub const HASH_COST: u32 = 12;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, HASH_COST)
        .map_err(|e| AppError::internal(anyhow!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal(anyhow!("Failed to verify password: {}", e)))
}

/// [`hash_password`] on the blocking pool, keeping runtime workers free.
pub async fn hash_password_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::internal(anyhow!("Password hashing task failed: {}", e)))?
}

/// [`verify_password`] on the blocking pool.
pub async fn verify_password_blocking(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::internal(anyhow!("Password verification task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_hash_uses_configured_cost() {
        let hash = hash_password("123123").unwrap();

        assert_ne!(hash, "123123");
        // $2b$12$...
        assert_eq!(&hash[4..6], "12");
    }

    #[test]
    fn test_verify_password_correct_and_incorrect() {
        let hash = hash_password("correctpassword").unwrap();

        assert!(verify_password("correctpassword", &hash).unwrap());
        assert!(!verify_password("wrongpassword", &hash).unwrap());
        assert!(!verify_password("CorrectPassword", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        let err = verify_password("testpassword", "not_a_valid_bcrypt_hash").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
    }

    #[tokio::test]
    async fn test_blocking_variants_round_trip() {
        let hash = hash_password_blocking("p@ssw0rd!".to_string())
            .await
            .unwrap();

        assert!(
            verify_password_blocking("p@ssw0rd!".to_string(), hash.clone())
                .await
                .unwrap()
        );
        assert!(
            !verify_password_blocking("p@ssw0rd".to_string(), hash)
                .await
                .unwrap()
        );
    }
}
