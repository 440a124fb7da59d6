use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;
use voting::VoteError;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Vote(VoteError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized,
}

impl WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Vote(err) => match err {
                VoteError::NotOpen(_)
                | VoteError::AlreadyVoted
                | VoteError::InvalidTransition { .. }
                | VoteError::InactiveContest => StatusCode::CONFLICT,
                VoteError::NotEligible | VoteError::NotAuthorized => StatusCode::FORBIDDEN,
                VoteError::OutOfRange { .. } | VoteError::InvalidSubmission(_) => {
                    StatusCode::BAD_REQUEST
                }
                VoteError::NotFound(_) => StatusCode::NOT_FOUND,
                VoteError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Vote(err) => err.code(),
            Self::Validation(_) => "validation_failed",
            Self::BadRequest(_) => "bad_request",
            Self::Unauthorized => "unauthorized",
        }
    }
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vote(e) => write!(f, "{}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let code = self.code();

        let body = match &self {
            Self::Vote(VoteError::Storage(e)) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "error": "An internal error occurred",
                    "code": code
                })
            }
            Self::Vote(e) => {
                tracing::warn!(code, "Rejected voting request: {}", e);
                json!({
                    "error": e.to_string(),
                    "code": code
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "error": "Validation failed",
                    "code": code,
                    "details": field_errors
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "error": msg,
                    "code": code
                })
            }
            Self::Unauthorized => {
                json!({
                    "error": "Unauthorized",
                    "code": code
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<VoteError> for WebError {
    fn from(error: VoteError) -> Self {
        Self::Vote(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

pub type ApiResult<T> = Result<T, WebError>;
