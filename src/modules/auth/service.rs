use anyhow::anyhow;
use tracing::{debug, info, instrument, warn};

use postboard_auth::create_access_token;
use postboard_config::JwtConfig;
use postboard_core::password::{hash_password_blocking, verify_password_blocking};
use postboard_core::{AppError, validate_input};
use postboard_db::Store;
use postboard_models::{AuthData, LoginRequest, NewUser, User, UserInput};

use crate::metrics;

pub struct AuthService;

impl AuthService {
    /// Creates an account. The password is stored only as a bcrypt hash and
    /// the returned user never carries it.
    #[instrument(skip(store, input), fields(user.email = %input.email))]
    pub async fn register(store: &Store, input: UserInput) -> Result<User, AppError> {
        validate_input(&input)?;

        if store.users.find_by_email(&input.email).await?.is_some() {
            warn!(user.email = %input.email, "Attempted to register an existing email");
            return Err(AppError::duplicate_user(anyhow!("User exist")));
        }

        let password_hash = hash_password_blocking(input.password).await?;

        let record = store
            .users
            .insert(NewUser {
                email: input.email,
                name: input.name,
                password_hash,
            })
            .await?;

        metrics::track_user_registered();
        info!(user.id = %record.id, "User registered");

        Ok(record.into())
    }

    #[instrument(skip(store, input, jwt_config), fields(user.email = %input.email))]
    pub async fn login(
        store: &Store,
        input: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthData, AppError> {
        let Some(user) = store.users.find_by_email(&input.email).await? else {
            debug!("Login for unknown email");
            metrics::track_login_failure("user_not_found");
            return Err(AppError::not_found(anyhow!("User not found")));
        };

        let is_valid = verify_password_blocking(input.password, user.password_hash).await?;
        if !is_valid {
            debug!(user.id = %user.id, "Login with wrong password");
            metrics::track_login_failure("invalid_password");
            return Err(AppError::invalid_credentials(anyhow!("Password not matched")));
        }

        let token = create_access_token(user.id, &user.email, jwt_config)?;

        metrics::track_jwt_issued();
        metrics::track_login_success();
        info!(user.id = %user.id, "User logged in");

        Ok(AuthData {
            token,
            user_id: user.id,
        })
    }
}
