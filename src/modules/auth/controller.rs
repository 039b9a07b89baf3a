use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use postboard_core::{AppError, ErrorBody};
use postboard_models::{AuthData, LoginRequest, User, UserInput};

use super::service::AuthService;
use crate::state::AppState;
use crate::validator::JsonBody;

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = UserInput,
    responses(
        (status = 201, description = "User registered successfully", body = User),
        (status = 400, description = "Malformed request body", body = ErrorBody),
        (status = 422, description = "Input invalid or email already registered", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn register_user(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<UserInput>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = AuthService::register(&state.store, input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Log in and receive a one-hour access token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthData),
        (status = 400, description = "Malformed request body", body = ErrorBody),
        (status = 404, description = "Unknown email or wrong password", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn login_user(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginRequest>,
) -> Result<Json<AuthData>, AppError> {
    let auth = AuthService::login(&state.store, input, &state.jwt_config).await?;
    Ok(Json(auth))
}
