use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use postboard_core::AppError;

/// JSON body extractor whose rejections use the API error envelope.
///
/// Only deserialization happens here. Field validation belongs to the
/// services, which must check authentication first.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request(anyhow!(
            "Missing 'Content-Type: application/json' header"
        ));
    }

    let error_msg = rejection.body_text();

    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        return AppError::bad_request(anyhow!("{} is required", field));
    }

    if error_msg.contains("invalid type") {
        return AppError::bad_request(anyhow!("Invalid field type in request"));
    }

    AppError::bad_request(anyhow!("Invalid request body"))
}

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        Ok(JsonBody(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use postboard_core::ErrorKind;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        title: String,
    }

    fn request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let req = request(Some("application/json"), r#"{"title":"hello"}"#);
        let JsonBody(payload) = JsonBody::<Payload>::from_request(req, &()).await.unwrap();
        assert_eq!(payload.title, "hello");
    }

    #[tokio::test]
    async fn test_missing_field_names_the_field() {
        let req = request(Some("application/json"), "{}");
        let err = JsonBody::<Payload>::from_request(req, &())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::BadRequest);
        assert_eq!(err.message(), "title is required");
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let req = request(None, r#"{"title":"hello"}"#);
        let err = JsonBody::<Payload>::from_request(req, &())
            .await
            .unwrap_err();

        assert_eq!(err.status().as_u16(), 400);
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let req = request(Some("application/json"), "{not json");
        let err = JsonBody::<Payload>::from_request(req, &())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::BadRequest);
        assert_eq!(err.message(), "Invalid request body");
    }
}
