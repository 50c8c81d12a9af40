//! API error types with IntoResponse
//!
//! Errors become generic error pages: a JSON body with an error code and a
//! message, and a matching status. Database details are logged, never sent.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::borrow::Cow;

use crate::db::repos::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Form validation failed (400)
    Validation(ValidationError),

    /// Resource or page not found (404)
    NotFound { resource: &'static str, id: String },

    /// Delete blocked by existing references (409)
    Conflict {
        resource: &'static str,
        id: String,
        reason: &'static str,
    },

    /// Database error or failed write (500, logged)
    Database(DbError),
}

/// Body shared by every error page
#[derive(Serialize)]
struct ErrorPage {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
    message: Cow<'static, str>,
}

const INTERNAL_MESSAGE: &str = "an internal error occurred";

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn page(&self) -> ErrorPage {
        match self {
            Self::Validation(e) => ErrorPage {
                error: "validation_error",
                field: Some(e.field()),
                message: Cow::Owned(e.to_string()),
            },
            Self::NotFound { resource, id } => ErrorPage {
                error: "not_found",
                field: None,
                message: Cow::Owned(format!("{} '{}' not found", resource, id)),
            },
            Self::Conflict {
                resource,
                id,
                reason,
            } => ErrorPage {
                error: "conflict",
                field: None,
                message: Cow::Owned(format!("{} '{}' {}", resource, id, reason)),
            },
            Self::Database(e) => {
                tracing::error!(error = %e, "database error");
                ErrorPage {
                    error: "internal_error",
                    field: None,
                    message: Cow::Borrowed(INTERNAL_MESSAGE),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.page())).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Conflict {
                resource,
                id,
                reason,
            } => Self::Conflict {
                resource,
                id,
                reason,
            },
            _ => Self::Database(e),
        }
    }
}
