//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use postboard_domain::error::PostboardError;

const INVALID_INPUT: &str = "Invalid input processing request";
const INTERNAL: &str = "An internal server error occurred!";

/// JSON body returned by every endpoint that does not succeed.
#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<String>,
}

/// Everything a handler can fail with.
#[derive(Debug)]
pub enum ApiError {
    /// The body, query string or path could not be extracted.
    InvalidInput(String),
    /// A use-case returned an error.
    Domain(PostboardError),
}

impl From<PostboardError> for ApiError {
    fn from(err: PostboardError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl ApiError {
    fn parts(self) -> (StatusCode, ErrorBody) {
        let plain = |status, message: String| {
            (
                status,
                ErrorBody {
                    message,
                    errors: None,
                },
            )
        };
        match self {
            Self::InvalidInput(detail) => {
                tracing::warn!(%detail, "request input failed to parse");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorBody {
                        message: INVALID_INPUT.to_string(),
                        errors: Some(detail),
                    },
                )
            }
            Self::Domain(
                err @ (PostboardError::Validation(_) | PostboardError::PageOutOfRange(_)),
            ) => plain(StatusCode::BAD_REQUEST, err.to_string()),
            Self::Domain(err @ PostboardError::NotFound(_)) => {
                plain(StatusCode::NOT_FOUND, err.to_string())
            }
            Self::Domain(err @ PostboardError::AlreadyExists(_)) => {
                plain(StatusCode::CONFLICT, err.to_string())
            }
            Self::Domain(err @ (PostboardError::Event(_) | PostboardError::Storage(_))) => {
                tracing::error!(error = %err, "request failed");
                plain(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.parts();
        (status, Json(body)).into_response()
    }
}
