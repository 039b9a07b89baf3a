use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use postboard::cli::{Cli, Commands, create_user};
use postboard::logging::init_tracing;
use postboard::metrics::{init_metrics, metrics_app};
use postboard::router::init_router;
use postboard::state::init_app_state;
use postboard_config::{AppConfig, StorageBackend};
use postboard_db::{init_db_pool, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env();
    init_tracing(&config.observability)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Migrate => migrate(config).await,
        Commands::CreateUser {
            email,
            password,
            name,
        } => {
            let state = init_app_state(&config).await?;
            if config.database.backend == StorageBackend::Memory {
                warn!("The in-memory store does not outlive this command");
            }

            let user = create_user(&state.store, email, password, name)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

            info!(user.id = %user.id, user.email = %user.email, "User created");
            Ok(())
        }
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let state = init_app_state(&config).await?;
    let mut app = init_router(state);

    if let Some(handle) = init_metrics(&config.observability)? {
        app = app.merge(metrics_app(handle));
    }

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(address = %addr, "Server listening");
    info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn migrate(config: AppConfig) -> anyhow::Result<()> {
    if config.database.backend == StorageBackend::Memory {
        warn!("STORAGE_BACKEND is memory; there is nothing to migrate");
        return Ok(());
    }

    let pool = init_db_pool(&config.database).await?;
    run_migrations(&pool).await?;
    info!("Migrations applied");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("Shutdown signal received");
}
