use postboard_config::{AppConfig, CorsConfig, JwtConfig, StorageBackend};
use postboard_db::{Store, init_db_pool, run_migrations};
use tracing::{info, warn};

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: Store,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(store: Store, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            store,
            jwt_config,
            cors_config,
        }
    }
}

/// Builds the state for the configured storage backend. The postgres backend
/// is migrated before use.
pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    if config.jwt.is_default_secret() {
        warn!("JWT_SECRET is not set; using the built-in development secret");
    }

    let store = match config.database.backend {
        StorageBackend::Postgres => {
            let pool = init_db_pool(&config.database).await?;
            run_migrations(&pool).await?;
            info!(
                max_connections = config.database.max_connections,
                "Connected to PostgreSQL"
            );
            Store::postgres(pool)
        }
        StorageBackend::Memory => {
            warn!("Using the in-memory store; data is lost on restart");
            Store::in_memory()
        }
    };

    Ok(AppState::new(
        store,
        config.jwt.clone(),
        config.cors.clone(),
    ))
}
