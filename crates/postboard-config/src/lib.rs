//! # Postboard Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing secret
//! - [`database`]: storage backend and connection settings
//! - [`server`]: listen address
//! - [`cors`]: allowed origins
//! - [`observability`]: log level/directory and metrics toggle
//!
//! Every struct offers `from_env()` plus `from_lookup()`, which takes any
//! `Fn(&str) -> Option<String>` so tests can feed a map instead of mutating
//! the process environment.
//!
//! # Example
//!
//! ```ignore
//! use postboard_config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env();
//! println!("listening on {}", config.server.addr());
//! ```

pub mod cors;
pub mod database;
pub mod jwt;
pub mod observability;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::{DatabaseConfig, StorageBackend};
pub use jwt::JwtConfig;
pub use observability::ObservabilityConfig;
pub use server::ServerConfig;

/// Every configuration section, loaded once at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub jwt: JwtConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            jwt: JwtConfig::from_lookup(&lookup),
            database: DatabaseConfig::from_lookup(&lookup),
            server: ServerConfig::from_lookup(&lookup),
            cors: CorsConfig::from_lookup(&lookup),
            observability: ObservabilityConfig::from_lookup(&lookup),
        }
    }
}

/// Parses `key` with `FromStr`, falling back to `default` when unset or invalid.
pub(crate) fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

pub(crate) fn flag_or<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| {
            let v = v.trim().to_lowercase();
            v == "true" || v == "1"
        })
        .unwrap_or(default)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;

    pub fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_with_empty_environment() {
        let config = AppConfig::from_lookup(|_| None);

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.backend, StorageBackend::Postgres);
        assert!(config.database.url.is_none());
        assert!(config.jwt.is_default_secret());
        assert!(config.cors.allows_any_origin());
        assert!(config.observability.metrics_enabled);
    }

    #[test]
    fn test_flag_parsing() {
        let lookup = test_support::lookup(&[("A", "1"), ("B", "TRUE"), ("C", "no")]);

        assert!(flag_or(&lookup, "A", false));
        assert!(flag_or(&lookup, "B", false));
        assert!(!flag_or(&lookup, "C", true));
        assert!(flag_or(&lookup, "MISSING", true));
    }
}
