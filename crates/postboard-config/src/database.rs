use crate::parse_or;

/// Where users and posts are persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    /// In-process store; contents are lost on restart.
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend: {}", other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    /// Connection string, required by the postgres backend.
    pub url: Option<String>,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            backend: parse_or(&lookup, "STORAGE_BACKEND", StorageBackend::Postgres),
            url: lookup("DATABASE_URL").filter(|s| !s.is_empty()),
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5),
        }
    }
}
