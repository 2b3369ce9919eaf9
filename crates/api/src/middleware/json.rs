//! JSON body extractor.
//!
//! Same as `axum::Json`, but malformed or mistyped bodies are rejected with
//! a 400 `{ "error": ... }` body instead of axum's plain-text rejection.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
                Err(AppError::Validation("Invalid request body".to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::header::CONTENT_TYPE};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        guests: i64,
    }

    fn request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn parses_valid_body() {
        let JsonBody(payload) = JsonBody::<Payload>::from_request(request(r#"{"guests":4}"#), &())
            .await
            .unwrap();

        assert_eq!(payload.guests, 4);
    }

    #[tokio::test]
    async fn malformed_body_is_a_validation_error() {
        let result = JsonBody::<Payload>::from_request(request("{not json"), &()).await;

        let Err(AppError::Validation(message)) = result else {
            panic!("Expected validation error");
        };
        assert_eq!(message, "Invalid request body");
    }

    #[tokio::test]
    async fn wrong_field_type_is_a_validation_error() {
        let result =
            JsonBody::<Payload>::from_request(request(r#"{"guests":"four"}"#), &()).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
