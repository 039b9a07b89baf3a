/// Secret used when `JWT_SECRET` is unset. Only suitable for local development.
pub const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            secret: lookup("JWT_SECRET")
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string()),
        }
    }

    pub fn is_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}
