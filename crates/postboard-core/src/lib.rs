//! # Postboard Core
//!
//! Foundational types shared by every Postboard crate:
//!
//! - [`errors`]: the [`AppError`] taxonomy and its HTTP response conversion
//! - [`password`]: bcrypt hashing and verification
//! - [`validation`]: turning `validator` failures into error detail lists
//! - [`serde`]: ISO-8601 timestamp (de)serialization
//!
//! # Example
//!
//! ```ignore
//! use postboard_core::{AppError, ErrorKind, hash_password, verify_password};
//!
//! let hash = hash_password("secret1")?;
//! if !verify_password("secret1", &hash)? {
//!     return Err(AppError::invalid_credentials(anyhow::anyhow!("Password not matched")));
//! }
//! ```

pub mod errors;
pub mod password;
pub mod serde;
pub mod validation;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorBody, ErrorDetail, ErrorKind};
pub use password::{
    HASH_COST, hash_password, hash_password_blocking, verify_password, verify_password_blocking,
};
pub use validation::validate_input;
