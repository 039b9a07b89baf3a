//! # Postboard API
//!
//! A small blogging backend built with Rust, Axum and PostgreSQL: users
//! register and log in for a one-hour bearer token, then create, list, update
//! and delete posts. Only a post's creator may change or remove it.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── cli/              # clap commands (serve, migrate, create-user)
//! ├── middleware/       # Access guard and request-context extractor
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Register and login
//! │   └── posts/       # Post CRUD
//! ├── docs.rs           # OpenAPI document
//! ├── logging.rs        # Subscriber setup and request logging
//! ├── metrics.rs        # Prometheus exporter and business counters
//! ├── router.rs         # Route table and layers
//! ├── state.rs          # Shared application state
//! └── validator.rs      # JSON body extractor
//! ```
//!
//! Each feature module follows the same structure:
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: business rules, independent of HTTP
//! - `router.rs`: Axum router configuration
//!
//! Entities and DTOs live in `postboard-models`, persistence in `postboard-db`.
//!
//! ## Authentication
//!
//! Every `/api` request passes through the access guard, which turns the
//! `Authorization: Bearer <token>` header into a [`RequestContext`]. A missing
//! or invalid token never rejects the request by itself; post operations
//! reject anonymous callers with `401`.
//!
//! ## Quick Start
//!
//! ```bash
//! STORAGE_BACKEND=memory JWT_SECRET=dev-secret cargo run
//! ```
//!
//! Swagger UI is served at `http://localhost:8080/swagger-ui`.
//!
//! [`RequestContext`]: postboard_auth::RequestContext

pub mod cli;
pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use postboard_auth;
pub use postboard_config;
pub use postboard_core;
pub use postboard_db;
pub use postboard_models;
