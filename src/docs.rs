use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use postboard_core::{ErrorBody, ErrorDetail};
use postboard_models::{AuthData, LoginRequest, PostInput, PostList, PostResponse, User, UserInput};

use crate::router::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::health,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::posts::controller::get_posts,
        crate::modules::posts::controller::create_post,
        crate::modules::posts::controller::update_post,
        crate::modules::posts::controller::delete_post,
    ),
    components(
        schemas(
            User,
            UserInput,
            LoginRequest,
            AuthData,
            PostInput,
            PostResponse,
            PostList,
            ErrorBody,
            ErrorDetail,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Posts", description = "Post management; changes are limited to the creator"),
        (name = "Health", description = "Liveness probe")
    ),
    info(
        title = "Postboard API",
        version = "0.1.0",
        description = "User registration, bearer-token authentication and owner-scoped post management.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        for expected in [
            "/health",
            "/api/auth/register",
            "/api/auth/login",
            "/api/posts",
            "/api/posts/{id}",
        ] {
            assert!(paths.iter().any(|p| p == expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
