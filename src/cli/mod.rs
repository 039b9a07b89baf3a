//! Command-line interface.
//!
//! `serve` is the default when no subcommand is given.

use clap::{Parser, Subcommand};

use postboard_core::AppError;
use postboard_db::Store;
use postboard_models::{User, UserInput};

use crate::modules::auth::service::AuthService;

#[derive(Debug, Parser)]
#[command(name = "postboard")]
#[command(about = "Postboard API server and administrative tools", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve,
    /// Apply pending database migrations
    Migrate,
    /// Register a user account directly against the configured store
    CreateUser {
        /// Email address
        #[arg(short = 'e', long)]
        email: String,

        /// Password, at least 5 characters
        #[arg(short = 'p', long)]
        password: String,

        /// Display name
        #[arg(short = 'n', long)]
        name: String,
    },
}

/// Registers a user through the same path as `POST /api/auth/register`.
pub async fn create_user(
    store: &Store,
    email: String,
    password: String,
    name: String,
) -> Result<User, AppError> {
    AuthService::register(
        store,
        UserInput {
            email,
            password,
            name,
        },
    )
    .await
}
