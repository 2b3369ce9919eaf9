use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use shared::api::ErrorBody;

pub enum AppError {
    /// Internal errors (storage and the like) - logged but return generic 500 to user
    Internal(anyhow::Error),
    /// User-facing errors - message is safe to show
    External(StatusCode, &'static str),
    /// Validation errors - safe to show
    Validation(String),
    /// Rate limit hit on one of the abuse keys
    RateLimited {
        message: &'static str,
        retry_after: u64,
    },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::External(status, _) => *status,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Internal(err) => write!(f, "Internal({:?})", err),
            AppError::External(status, msg) => write!(f, "External({}, {})", status, msg),
            AppError::Validation(msg) => write!(f, "Validation({})", msg),
            AppError::RateLimited {
                message,
                retry_after,
            } => write!(f, "RateLimited({}, retry after {}s)", message, retry_after),
        }
    }
}

fn body(error: impl Into<String>, retry_after: Option<u64>) -> Json<ErrorBody> {
    Json(ErrorBody {
        error: error.into(),
        retry_after,
    })
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::Internal(err) => {
                tracing::error!("internal error: {:?}", err);
                sentry::capture_error(
                    err.as_ref() as &(dyn std::error::Error + Send + Sync + 'static)
                );

                (status, body("Storage unavailable. Try again later.", None)).into_response()
            }
            AppError::External(_, msg) => (status, body(msg, None)).into_response(),
            AppError::Validation(msg) => (status, body(msg, None)).into_response(),
            AppError::RateLimited {
                message,
                retry_after,
            } => {
                let mut response = (status, body(message, Some(retry_after))).into_response();
                response
                    .headers_mut()
                    .insert(RETRY_AFTER, HeaderValue::from(retry_after));
                response
            }
        }
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}
