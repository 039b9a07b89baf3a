use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use postboard_auth::RequestContext;

use crate::state::AppState;

/// Derives the [`RequestContext`] for every request it wraps. Never rejects.
pub async fn access_guard(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let context = RequestContext::from_authorization(authorization, &state.jwt_config);
    req.extensions_mut().insert(context);

    next.run(req).await
}

/// The context stored by [`access_guard`]; anonymous on unguarded routes.
#[derive(Debug, Clone, Copy)]
pub struct AuthContext(pub RequestContext);

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = parts
            .extensions
            .get::<RequestContext>()
            .copied()
            .unwrap_or_default();

        Ok(AuthContext(context))
    }
}
