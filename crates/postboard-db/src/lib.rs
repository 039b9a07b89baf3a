//! # Postboard DB
//!
//! Persistence for users and posts.
//!
//! Services talk to the [`UserRepository`] / [`PostRepository`] traits through
//! a [`Store`]; two implementations exist:
//!
//! - [`PgStore`]: PostgreSQL via SQLx
//! - [`MemoryStore`]: process-local, for development and tests
//!
//! # Example
//!
//! ```ignore
//! use postboard_config::DatabaseConfig;
//! use postboard_db::{Store, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
//! run_migrations(&pool).await?;
//! let store = Store::postgres(pool);
//! ```

pub mod memory;
pub mod postgres;
pub mod repository;

use std::fmt;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use postboard_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use repository::{PostRepository, UserRepository};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Connects a PostgreSQL pool sized by `DATABASE_MAX_CONNECTIONS`.
///
/// # Errors
///
/// Fails if `DATABASE_URL` is unset or the database is unreachable.
pub async fn init_db_pool(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let url = config
        .url
        .as_deref()
        .ok_or_else(|| anyhow!("DATABASE_URL must be set for the postgres backend"))?;

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(url)
        .await
        .context("Failed to connect to database")
}

/// Applies the migrations embedded from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")
}

/// The repositories a request handler needs, behind trait objects.
#[derive(Clone)]
pub struct Store {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
}

impl Store {
    pub fn new(users: Arc<dyn UserRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { users, posts }
    }

    pub fn postgres(pool: PgPool) -> Self {
        let store = Arc::new(PgStore::new(pool));
        Self::new(store.clone(), store)
    }

    /// A fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(store.clone(), store)
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}
