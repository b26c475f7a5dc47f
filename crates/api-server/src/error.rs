use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use thiserror::Error;
use tracing::debug;

/// Everything a handler can fail with, rendered as a plain-text body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{0}")]
    MalformedBody(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(err) => match err {
                DomainError::NotFound(_) => StatusCode::NOT_FOUND,
                DomainError::AlreadyExists => StatusCode::CONFLICT,
                DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
                DomainError::MissingField(_)
                | DomainError::BlankField(_)
                | DomainError::InvalidFieldType(_)
                | DomainError::InvalidEmailFormat
                | DomainError::InvalidUsername
                | DomainError::UnsupportedOperation(_)
                | DomainError::FieldNotPatchable { .. } => StatusCode::BAD_REQUEST,
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        debug!("responding {} {}", status.as_u16(), self);
        (status, self.to_string()).into_response()
    }
}
