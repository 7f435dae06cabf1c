//! API errors and their HTTP status mapping.

use crate::types::ErrorRes;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use care_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{detail}")]
    BadRequest {
        detail: String,
        field: Option<String>,
    },
    #[error("{0}")]
    NotFound(String),
    #[error("{detail}")]
    Unprocessable {
        detail: String,
        field: Option<String>,
    },
    /// Extractor rejection carrying a status other than 400 or 422.
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest {
            detail: detail.into(),
            field: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Rejected { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Report a missing patient as 400, as the mutating endpoints do.
    pub fn not_found_as_bad_request(self) -> Self {
        match self {
            ApiError::NotFound(detail) => ApiError::bad_request(detail),
            other => other,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (detail, field) = match self {
            ApiError::BadRequest { detail, field } => (detail, field),
            ApiError::Unprocessable { detail, field } => (detail, field),
            ApiError::NotFound(detail) | ApiError::Rejected { detail, .. } => (detail, None),
            ApiError::Internal(detail) => {
                tracing::error!("internal error: {}", detail);
                (detail, None)
            }
        };

        (status, Json(ErrorRes { detail, field })).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { field, message } => ApiError::Unprocessable {
                detail: format!("invalid {field}: {message}"),
                field: Some(field),
            },
            CoreError::Conflict(_) => ApiError::bad_request("Patient already exists"),
            CoreError::NotFound(_) => ApiError::NotFound("Patient not found".into()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let detail = rejection.body_text();
        match rejection.status() {
            StatusCode::UNPROCESSABLE_ENTITY => ApiError::Unprocessable {
                detail,
                field: None,
            },
            StatusCode::BAD_REQUEST => ApiError::bad_request(detail),
            status => ApiError::Rejected { status, detail },
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        let detail = rejection.body_text();
        match rejection.status() {
            StatusCode::BAD_REQUEST => ApiError::bad_request(detail),
            status => ApiError::Rejected { status, detail },
        }
    }
}
